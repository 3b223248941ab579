use buildmart::domain::order::Order;
use buildmart::domain::types::OrderStatus;
use buildmart::listing::{
    ListingError, ListingQuery, ListingRequest, MAX_LIMIT, PageResult, SortOrder,
};
use buildmart::repository::errors::RepositoryError;
use buildmart::repository::memory::MemoryCollection;
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn order(id: i32, minutes: i64, status: OrderStatus, name: &str, address: &str) -> Order {
    let created_at = base_time() + Duration::minutes(minutes);
    Order {
        id,
        customer_name: name.to_string(),
        phone: format!("+7 900 000-{id:04}"),
        address: address.to_string(),
        comment: None,
        items: vec![],
        total: 0,
        status,
        created_at,
        updated_at: created_at,
    }
}

fn numbered_orders(count: i32) -> MemoryCollection<Order> {
    MemoryCollection::new(
        (1..=count)
            .map(|id| {
                order(
                    id,
                    i64::from(id),
                    OrderStatus::New,
                    &format!("Customer {id}"),
                    "Depot",
                )
            })
            .collect(),
    )
}

fn list(collection: &MemoryCollection<Order>, request: &ListingRequest) -> PageResult<Order> {
    ListingQuery::new(collection).list(request).unwrap()
}

#[test]
fn pages_of_a_125_record_collection() {
    let orders = numbered_orders(125);

    let first = list(&orders, &ListingRequest::new(1, 50));
    assert_eq!(first.items().len(), 50);
    assert_eq!(first.total_count(), 125);
    assert_eq!(first.total_pages(), 3);
    assert!(first.has_next_page());
    assert!(!first.has_prev_page());
    assert_eq!(first.items()[0].id, 125);

    let last = list(&orders, &ListingRequest::new(3, 50));
    assert_eq!(last.items().len(), 25);
    assert_eq!(last.current_page(), 3);
    assert!(!last.has_next_page());
    assert!(last.has_prev_page());
    assert_eq!(last.items()[24].id, 1);
}

#[test]
fn limit_is_capped_and_defaulted() {
    let orders = numbered_orders(1200);

    let capped = list(&orders, &ListingRequest::new(1, 5000));
    assert_eq!(capped.limit(), MAX_LIMIT);
    assert_eq!(capped.items().len(), 1000);
    assert_eq!(capped.total_pages(), 2);

    let defaulted = list(&orders, &ListingRequest::from_raw(Some("0"), Some("0")));
    assert_eq!(defaulted.limit(), 50);
    assert_eq!(defaulted.items().len(), 50);
    assert_eq!(defaulted.current_page(), 1);
}

#[test]
fn page_past_the_end_is_empty_but_consistent() {
    let orders = numbered_orders(10);
    let page = list(&orders, &ListingRequest::new(5, 5));
    assert!(page.items().is_empty());
    assert_eq!(page.total_pages(), 2);
    assert!(!page.has_next_page());
    assert!(page.has_prev_page());
}

#[test]
fn empty_collection_has_no_pages() {
    let orders = MemoryCollection::<Order>::new(vec![]);
    for (page, limit) in [(1, 50), (7, 1), (-1, 2000)] {
        let result = list(&orders, &ListingRequest::new(page, limit));
        assert!(result.items().is_empty());
        assert_eq!(result.total_count(), 0);
        assert_eq!(result.total_pages(), 0);
        assert_eq!(result.current_page(), 1);
        assert!(!result.has_next_page());
        assert!(!result.has_prev_page());
    }
}

#[test]
fn repeated_requests_return_identical_pages() {
    // Identical timestamps force the id tie-breaker.
    let orders = MemoryCollection::new(
        (1..=30)
            .map(|id| order(id, 0, OrderStatus::New, "Same", "Same"))
            .collect(),
    );
    let request = ListingRequest::new(2, 7);

    let a = list(&orders, &request);
    let b = list(&orders, &request);
    assert_eq!(a, b);

    let ids: Vec<i32> = a.items().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![23, 22, 21, 20, 19, 18, 17]);
}

#[test]
fn pages_partition_the_population() {
    let orders = numbered_orders(23);
    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let result = list(&orders, &ListingRequest::new(page, 5));
        seen.extend(result.items().iter().map(|o| o.id));
        if !result.has_next_page() {
            break;
        }
        page += 1;
    }
    let expected: Vec<i32> = (1..=23).rev().collect();
    assert_eq!(seen, expected);
}

#[test]
fn oldest_first_reverses_the_order() {
    let orders = numbered_orders(5);
    let page = list(
        &orders,
        &ListingRequest::default().with_sort(SortOrder::OldestFirst),
    );
    let ids: Vec<i32> = page.items().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn all_status_equals_no_status() {
    let orders = MemoryCollection::new(vec![
        order(1, 1, OrderStatus::New, "A", "x"),
        order(2, 2, OrderStatus::Shipped, "B", "y"),
        order(3, 3, OrderStatus::Cancelled, "C", "z"),
    ]);

    let unfiltered = list(&orders, &ListingRequest::default());
    let all = list(&orders, &ListingRequest::default().with_status("all"));
    assert_eq!(unfiltered, all);
    assert_eq!(all.total_count(), 3);

    let shipped = list(&orders, &ListingRequest::default().with_status("shipped"));
    assert_eq!(shipped.total_count(), 1);
    assert_eq!(shipped.items()[0].id, 2);
}

#[test]
fn search_is_case_insensitive_substring() {
    let orders = MemoryCollection::new(vec![
        order(1, 1, OrderStatus::New, "Ivan", "ACME Corp"),
        order(2, 2, OrderStatus::New, "Petr", "Acne Corp"),
    ]);

    let page = list(&orders, &ListingRequest::default().with_search("acme"));
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.items()[0].id, 1);

    let blank = list(&orders, &ListingRequest::default().with_search("   "));
    assert_eq!(blank.total_count(), 2);
}

#[test]
fn search_and_status_combine() {
    let orders = MemoryCollection::new(vec![
        order(1, 1, OrderStatus::New, "Ivan", "Lenina 1"),
        order(2, 2, OrderStatus::Shipped, "Ivan", "Lenina 2"),
        order(3, 3, OrderStatus::Shipped, "Olga", "Mira 3"),
    ]);

    let page = list(
        &orders,
        &ListingRequest::default()
            .with_status("shipped")
            .with_search("LENINA"),
    );
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.items()[0].id, 2);
}

#[test]
fn unavailable_collection_fails_without_a_page() {
    let orders = MemoryCollection::<Order>::unavailable();
    let result = ListingQuery::new(&orders).list::<Order>(&ListingRequest::default());
    match result {
        Err(ListingError::ListingQueryFailed(RepositoryError::ConnectionError(_))) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn records_inserted_later_are_listed() {
    let orders = numbered_orders(2);
    orders
        .insert(order(3, 99, OrderStatus::Processing, "Late", "Depot"))
        .unwrap();

    let page = list(&orders, &ListingRequest::default());
    assert_eq!(page.total_count(), 3);
    assert_eq!(page.items()[0].id, 3);
}
