use buildmart::domain::craftsman::NewCraftsman;
use buildmart::domain::order::{NewOrder, Order, OrderItem};
use buildmart::domain::product::{NewProduct, UpdateProduct};
use buildmart::domain::types::{CraftsmanStatus, OrderStatus, ProductStatus};
use buildmart::listing::{Collection, ListingFilter, ListingRequest, SortOrder};
use buildmart::repository::errors::RepositoryError;
use buildmart::repository::{
    CraftsmanReader, CraftsmanWriter, DieselRepository, OrderReader, OrderWriter, ProductReader,
    ProductWriter,
};
use buildmart::services::{ServiceError, craftsmen, orders, products};
use chrono::{Duration, NaiveDate, NaiveDateTime};

mod common;

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn new_order(name: &str, address: &str, minutes: i64) -> NewOrder {
    NewOrder::new(
        name,
        "+7 900 123-45-67",
        address,
        None,
        vec![OrderItem {
            product_id: None,
            name: "Cement M500".into(),
            quantity: 2,
            price: 45_000,
        }],
    )
    .unwrap()
    .created_at(base_time() + Duration::minutes(minutes))
}

fn seed_orders(repo: &DieselRepository, count: i64) -> Vec<Order> {
    (1..=count)
        .map(|n| {
            repo.create_order(&new_order(&format!("Customer {n}"), "Depot", n))
                .unwrap()
        })
        .collect()
}

#[test]
fn create_and_read_order() {
    let test_db = common::TestDb::new("test_create_and_read_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_order(&new_order("Ivan", "Lenina 1", 0))
        .unwrap();
    assert_eq!(created.status, OrderStatus::New);
    assert_eq!(created.total, 90_000);
    assert_eq!(created.items.len(), 1);

    let loaded = repo.get_order_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(repo.get_order_by_id(created.id + 100).unwrap().is_none());
}

#[test]
fn order_pages_match_the_population() {
    let test_db = common::TestDb::new("test_order_pages.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_orders(&repo, 125);

    let first = orders::list_orders(&repo, &ListingRequest::new(1, 50)).unwrap();
    assert_eq!(first.items().len(), 50);
    assert_eq!(first.total_count(), 125);
    assert_eq!(first.total_pages(), 3);
    assert!(first.has_next_page());
    assert!(!first.has_prev_page());
    assert_eq!(first.items()[0].id, seeded[124].id);

    let last = orders::list_orders(&repo, &ListingRequest::new(3, 50)).unwrap();
    assert_eq!(last.items().len(), 25);
    assert!(!last.has_next_page());
    assert!(last.has_prev_page());
    assert_eq!(last.items()[24].id, seeded[0].id);

    let beyond = orders::list_orders(&repo, &ListingRequest::new(9, 50)).unwrap();
    assert!(beyond.items().is_empty());
    assert_eq!(beyond.total_count(), 125);
}

#[test]
fn equal_timestamps_break_ties_by_id() {
    let test_db = common::TestDb::new("test_equal_timestamps.db");
    let repo = DieselRepository::new(test_db.pool());
    let ids: Vec<i32> = (0..6)
        .map(|n| {
            repo.create_order(&new_order(&format!("Same {n}"), "Depot", 0))
                .unwrap()
                .id
        })
        .collect();

    let newest = orders::list_orders(&repo, &ListingRequest::new(1, 3)).unwrap();
    let newest_ids: Vec<i32> = newest.items().iter().map(|o| o.id).collect();
    assert_eq!(newest_ids, vec![ids[5], ids[4], ids[3]]);

    let oldest = orders::list_orders(
        &repo,
        &ListingRequest::new(1, 3).with_sort(SortOrder::OldestFirst),
    )
    .unwrap();
    let oldest_ids: Vec<i32> = oldest.items().iter().map(|o| o.id).collect();
    assert_eq!(oldest_ids, vec![ids[0], ids[1], ids[2]]);

    let again = orders::list_orders(&repo, &ListingRequest::new(1, 3)).unwrap();
    assert_eq!(again, newest);
}

#[test]
fn order_search_is_case_insensitive() {
    let test_db = common::TestDb::new("test_order_search.db");
    let repo = DieselRepository::new(test_db.pool());
    let acme = repo.create_order(&new_order("Ivan", "ACME Corp", 1)).unwrap();
    repo.create_order(&new_order("Petr", "Acne Corp", 2)).unwrap();
    let cyrillic = repo
        .create_order(&new_order("Иванов Пётр", "Москва", 3))
        .unwrap();

    let page = orders::list_orders(&repo, &ListingRequest::default().with_search("acme")).unwrap();
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.items()[0].id, acme.id);

    let page =
        orders::list_orders(&repo, &ListingRequest::default().with_search("ИВАНОВ")).unwrap();
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.items()[0].id, cyrillic.id);

    let page = orders::list_orders(&repo, &ListingRequest::default().with_search("corp")).unwrap();
    assert_eq!(page.total_count(), 2);
}

#[test]
fn search_wildcards_are_literal() {
    let test_db = common::TestDb::new("test_search_wildcards.db");
    let repo = DieselRepository::new(test_db.pool());
    let percent = repo.create_order(&new_order("Sale 50%", "Depot", 1)).unwrap();
    repo.create_order(&new_order("Sale 500", "Depot", 2)).unwrap();

    let filter = ListingFilter::new(None, Some("50%"));
    let found = <DieselRepository as Collection<Order>>::find_matching(
        &repo,
        &filter,
        SortOrder::NewestFirst,
        0,
        10,
    )
    .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, percent.id);
}

#[test]
fn status_filter_and_all() {
    let test_db = common::TestDb::new("test_status_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_orders(&repo, 4);
    repo.update_order_status(seeded[1].id, OrderStatus::Shipped)
        .unwrap();
    repo.update_order_status(seeded[3].id, OrderStatus::Shipped)
        .unwrap();

    let shipped =
        orders::list_orders(&repo, &ListingRequest::default().with_status("shipped")).unwrap();
    assert_eq!(shipped.total_count(), 2);
    assert!(
        shipped
            .items()
            .iter()
            .all(|o| o.status == OrderStatus::Shipped)
    );

    let all = orders::list_orders(&repo, &ListingRequest::default().with_status("all")).unwrap();
    let unfiltered = orders::list_orders(&repo, &ListingRequest::default()).unwrap();
    assert_eq!(all, unfiltered);
    assert_eq!(all.total_count(), 4);

    let combined = orders::list_orders(
        &repo,
        &ListingRequest::default()
            .with_status("shipped")
            .with_search("customer 2"),
    )
    .unwrap();
    assert_eq!(combined.total_count(), 1);
    assert_eq!(combined.items()[0].id, seeded[1].id);
}

#[test]
fn order_status_update_and_delete() {
    let test_db = common::TestDb::new("test_order_update_delete.db");
    let repo = DieselRepository::new(test_db.pool());
    let order = repo.create_order(&new_order("Olga", "Mira 3", 0)).unwrap();

    let updated = repo
        .update_order_status(order.id, OrderStatus::Processing)
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Processing);
    assert!(updated.updated_at >= order.updated_at);

    assert!(matches!(
        repo.update_order_status(order.id + 1, OrderStatus::Cancelled),
        Err(RepositoryError::NotFound)
    ));

    repo.delete_order(order.id).unwrap();
    assert!(repo.get_order_by_id(order.id).unwrap().is_none());
    assert!(matches!(
        orders::delete_order(&repo, order.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn product_crud_and_image() {
    let test_db = common::TestDb::new("test_product_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = repo
        .create_product(
            &NewProduct::new(
                "Brick",
                "Masonry",
                "Red clay brick",
                2_500,
                "pcs",
                ProductStatus::Active,
            )
            .unwrap(),
        )
        .unwrap();
    assert!(product.image_url.is_none());

    let updated = repo
        .update_product(
            product.id,
            &UpdateProduct::new(
                "Brick M150",
                "Masonry",
                "Red clay brick",
                2_700,
                "pcs",
                ProductStatus::OutOfStock,
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(updated.name, "Brick M150");
    assert_eq!(updated.price, 2_700);
    assert_eq!(updated.status, ProductStatus::OutOfStock);

    let with_image = repo
        .set_product_image(product.id, "http://shop.test/uploads/brick.jpg")
        .unwrap();
    assert_eq!(
        with_image.image_url.as_deref(),
        Some("http://shop.test/uploads/brick.jpg")
    );
    assert_eq!(
        repo.get_product_by_id(product.id).unwrap().unwrap(),
        with_image
    );

    let page = products::list_products(
        &repo,
        &ListingRequest::default()
            .with_status("out_of_stock")
            .with_search("clay"),
    )
    .unwrap();
    assert_eq!(page.total_count(), 1);

    repo.delete_product(product.id).unwrap();
    assert!(matches!(
        repo.delete_product(product.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        products::get_product(&repo, product.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn craftsman_crud_and_listing() {
    let test_db = common::TestDb::new("test_craftsman_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let roofer = repo
        .create_craftsman(
            &NewCraftsman::new("Sergey", "+7 901 000-00-01", "Kazan", "Roofing")
                .unwrap()
                .created_at(base_time()),
        )
        .unwrap();
    let tiler = repo
        .create_craftsman(
            &NewCraftsman::new("Anna", "+7 901 000-00-02", "Samara", "Tiling")
                .unwrap()
                .created_at(base_time() + Duration::hours(1)),
        )
        .unwrap();
    assert_eq!(roofer.status, CraftsmanStatus::Available);

    let page = craftsmen::list_craftsmen(&repo, &ListingRequest::default()).unwrap();
    let ids: Vec<i32> = page.items().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![tiler.id, roofer.id]);

    let page =
        craftsmen::list_craftsmen(&repo, &ListingRequest::default().with_search("kazan")).unwrap();
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.items()[0].id, roofer.id);

    assert_eq!(
        repo.get_craftsman_by_id(tiler.id).unwrap().unwrap(),
        tiler
    );
    repo.delete_craftsman(tiler.id).unwrap();
    assert!(matches!(
        craftsmen::get_craftsman(&repo, tiler.id),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        repo.delete_craftsman(tiler.id),
        Err(RepositoryError::NotFound)
    ));
}
