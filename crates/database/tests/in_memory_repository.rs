use core_types::{NewSalesRecord, OwnerId, ProductTotal, RecordScope};
use database::{InMemoryRepository, ReplaceOutcome, SalesRepository};
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn rows(entries: &[(&str, &str, i64)]) -> Vec<NewSalesRecord> {
    entries.iter()
        .map(|&(date, product, quantity)| NewSalesRecord {
            date: date.to_string(),
            product: product.to_string(),
            quantity,
        })
        .collect()
}

#[tokio::test]
async fn reupload_leaves_no_residual_rows() {
    let repo = InMemoryRepository::new();
    let owner = OwnerId(1);

    let first = Uuid::new_v4();
    repo.replace_all_for_owner(owner, first, &rows(&[("01/01/2024", "tea", 1), ("02/01/2024", "tea", 2)]))
        .await
        .unwrap();

    let second = Uuid::new_v4();
    let outcome = repo
        .replace_all_for_owner(owner, second, &rows(&[("03/01/2024", "coffee", 9)]))
        .await
        .unwrap();

    assert_eq!(outcome, ReplaceOutcome { deleted: 2, inserted: 1 });

    let stored = repo.list_records(RecordScope::Owner(owner)).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored.iter().all(|r| r.import_id == second));
    assert_eq!(stored[0].product, "coffee");
}

#[tokio::test]
async fn owners_are_isolated() {
    let repo = InMemoryRepository::new();
    let alice = OwnerId(1);
    let bob = OwnerId(2);

    repo.replace_all_for_owner(alice, Uuid::new_v4(), &rows(&[("01/01/2024", "tea", 1)]))
        .await
        .unwrap();
    repo.replace_all_for_owner(bob, Uuid::new_v4(), &rows(&[("01/01/2024", "cake", 5), ("02/01/2024", "cake", 5)]))
        .await
        .unwrap();

    // Re-uploading for Alice must not touch Bob's rows.
    repo.replace_all_for_owner(alice, Uuid::new_v4(), &[]).await.unwrap();

    assert_eq!(repo.count_by_owner(alice).await.unwrap(), 0);
    assert_eq!(repo.count_by_owner(bob).await.unwrap(), 2);
    assert_eq!(repo.list_records(RecordScope::Global).await.unwrap().len(), 2);
}

#[tokio::test]
async fn top_product_breaks_ties_by_name() {
    let repo = InMemoryRepository::new();
    let owner = OwnerId(3);
    repo.replace_all_for_owner(
        owner,
        Uuid::new_v4(),
        &rows(&[("01/01/2024", "pear", 2), ("01/01/2024", "apple", 3), ("02/01/2024", "pear", 1)]),
    )
    .await
    .unwrap();

    assert_eq!(
        repo.top_product_by_owner(owner).await.unwrap(),
        Some(ProductTotal {
            product: "apple".to_string(),
            total_quantity: 3
        })
    );
    assert_eq!(repo.top_product_by_owner(OwnerId(99)).await.unwrap(), None);
}

#[tokio::test]
async fn clearing_is_owner_scoped_unless_clearing_all() {
    let repo = InMemoryRepository::new();
    repo.replace_all_for_owner(OwnerId(1), Uuid::new_v4(), &rows(&[("01/01/2024", "tea", 1)]))
        .await
        .unwrap();
    repo.replace_all_for_owner(OwnerId(2), Uuid::new_v4(), &rows(&[("01/01/2024", "tea", 1)]))
        .await
        .unwrap();

    assert_eq!(repo.clear_owner(OwnerId(1)).await.unwrap(), 1);
    assert_eq!(repo.count_by_owner(OwnerId(2)).await.unwrap(), 1);

    assert_eq!(repo.clear_all().await.unwrap(), 1);
    assert!(repo.list_records(RecordScope::Global).await.unwrap().is_empty());
}

#[tokio::test]
async fn record_ids_keep_increasing_across_uploads() {
    let repo = InMemoryRepository::new();
    let owner = OwnerId(1);
    repo.replace_all_for_owner(owner, Uuid::new_v4(), &rows(&[("01/01/2024", "tea", 1)]))
        .await
        .unwrap();
    let first_id = repo.list_records(RecordScope::Owner(owner)).await.unwrap()[0].id;

    repo.replace_all_for_owner(owner, Uuid::new_v4(), &rows(&[("01/01/2024", "tea", 1)]))
        .await
        .unwrap();
    let second_id = repo.list_records(RecordScope::Owner(owner)).await.unwrap()[0].id;

    assert!(second_id > first_id);
}
