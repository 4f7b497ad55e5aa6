#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use pdfshelf_core::User;

    use crate::list_controller::test_support::{FakeUsers, controller, form, user};
    use crate::{AutoConfirm, ServiceError};

    const TWELVE: [&str; 12] = [
        "Ann", "Bob", "Cat", "Dan", "Eve", "Fay", "Gus", "Hal", "Ivy", "Jon", "Kim", "Lee",
    ];

    fn ids(items: &[User]) -> Vec<u64> {
        items.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn test_fetches_once_then_pages_locally() {
        let (list, h) = controller(FakeUsers::with_users(&TWELVE));
        list.load(1, "").await.unwrap();
        list.page(3).await.unwrap();
        list.load(2, "").await.unwrap();

        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 1);
        let view = list.view().await;
        assert_eq!(view.current_page, 2);
        assert_eq!(ids(&view.items), vec![6, 7, 8, 9, 10]);
        assert_eq!(view.total_pages, 3);
    }

    #[tokio::test]
    async fn test_refresh_refetches() {
        let (list, h) = controller(FakeUsers::with_users(&TWELVE));
        list.load(1, "").await.unwrap();
        list.refresh().await.unwrap();
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unique_substring_yields_single_row() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE));
        list.load(2, "").await.unwrap();

        list.load(1, "IVY").await.unwrap();
        let view = list.view().await;
        assert_eq!(ids(&view.items), vec![9]);
        assert_eq!(view.total_pages, 1);

        list.load(1, "").await.unwrap();
        let view = list.view().await;
        assert_eq!(ids(&view.items), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.total_items, 12);
    }

    #[tokio::test]
    async fn test_search_matches_rendered_birth_date() {
        let (list, _h) = controller(FakeUsers::with_users(&["Ann", "Bob"]));
        list.load(1, "").await.unwrap();
        list.load(1, "21/04/1990").await.unwrap();
        assert_eq!(list.view().await.total_items, 2);
    }

    #[tokio::test]
    async fn test_delete_one_of_two_on_last_page_keeps_page() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE));
        list.load(3, "").await.unwrap();

        list.delete(11, &AutoConfirm(true)).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.current_page, 3);
        assert_eq!(view.total_pages, 3);
        assert_eq!(ids(&view.items), vec![12]);
    }

    #[tokio::test]
    async fn test_delete_only_item_on_last_page_steps_back() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE[..11]));
        list.load(3, "").await.unwrap();

        list.delete(11, &AutoConfirm(true)).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.current_page, 2);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items.len(), 5);
    }

    #[tokio::test]
    async fn test_add_at_exact_multiple_lands_on_new_page() {
        let (list, h) = controller(FakeUsers::with_users(&TWELVE[..10]));
        list.load(1, "").await.unwrap();

        list.add(form("Mia", "mia@example.com")).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.current_page, 3);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].email, "mia@example.com");
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(h.notifier.successes(), vec!["User added successfully"]);
    }

    #[tokio::test]
    async fn test_add_without_echo_refetches_and_shows_last_page() {
        let (list, h) = controller(FakeUsers::with_users(&TWELVE[..5]));
        h.source.echo_created.store(false, Ordering::SeqCst);
        list.load(1, "").await.unwrap();

        list.add(form("Mia", "mia@example.com")).await.unwrap();

        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 2);
        let view = list.view().await;
        assert_eq!(view.current_page, 2);
        assert_eq!(view.items.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_locally() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann"]));
        list.load(1, "").await.unwrap();

        let err = list.add(form("Anna", "ann@example.com")).await.unwrap_err();

        let errors = err.validation().unwrap();
        assert_eq!(
            errors.for_field("email").collect::<Vec<_>>(),
            vec!["This email is already registered"]
        );
        assert_eq!(h.source.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_reports_every_field() {
        let (list, h) = controller(FakeUsers::with_users(&[]));
        let mut bad = form("R2D2", "nope");
        bad.dob = String::new();

        let err = list.add(bad).await.unwrap_err();

        assert_eq!(err.validation().map(|e| e.len()), Some(3));
        assert_eq!(h.notifier.errors().len(), 3);
        assert_eq!(h.source.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_edit_merges_without_dropping_fields() {
        let (list, _h) = controller(FakeUsers::with_users(&["Ann", "Bob"]));
        list.load(1, "").await.unwrap();

        list.edit(2, serde_json::json!({"firstName": "Robert"})).await.unwrap();

        let view = list.view().await;
        let bob = view.items.iter().find(|u| u.id == 2).unwrap();
        assert_eq!(bob.first_name, "Robert");
        assert_eq!(bob.email, "bob@example.com");
        assert_eq!(bob.dob_display(), "21/04/1990");
    }

    #[tokio::test]
    async fn test_failed_edit_keeps_local_copy() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann"]));
        list.load(1, "").await.unwrap();
        h.source.fail_mutations.store(true, Ordering::SeqCst);

        let err = list.edit(1, serde_json::json!({"firstName": "Zed"})).await.unwrap_err();

        assert!(matches!(err, ServiceError::Api(_)));
        assert_eq!(list.view().await.items[0].first_name, "Ann");
        assert_eq!(h.notifier.errors(), vec!["Failed to update user: Service unavailable"]);
    }

    #[tokio::test]
    async fn test_reorder_adopts_order_after_server_accepts() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann", "Bob", "Cat"]));
        list.load(1, "").await.unwrap();

        list.move_item(3, 1).await.unwrap();

        assert_eq!(ids(&list.view().await.items), vec![3, 1, 2]);
        assert_eq!(h.source.reorders.lock().unwrap().clone(), vec![vec![3, 1, 2]]);
    }

    #[tokio::test]
    async fn test_failed_reorder_keeps_order() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann", "Bob", "Cat"]));
        list.load(1, "").await.unwrap();
        h.source.fail_mutations.store(true, Ordering::SeqCst);

        assert!(list.move_item(1, 3).await.is_err());
        assert_eq!(ids(&list.view().await.items), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_partial_order() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann", "Bob"]));
        list.load(1, "").await.unwrap();
        let partial = vec![list.snapshot().await.items[1].clone()];

        let err = list.reorder(partial).await.unwrap_err();

        assert!(err.validation().is_some());
        assert!(h.source.reorders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_mutation_sequence_leaves_page_out_of_range() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE));
        list.load(3, "").await.unwrap();

        for id in [12, 11, 10, 9, 8, 7] {
            list.delete(id, &AutoConfirm(true)).await.unwrap();
            let view = list.view().await;
            assert!(view.current_page <= view.total_pages, "page {} of {}", view.current_page, view.total_pages);
        }
        list.add(form("Mia", "mia@example.com")).await.unwrap();
        list.edit(1, serde_json::json!({"firstName": "Zed"})).await.unwrap();
        list.load(1, "zed").await.unwrap();
        list.delete(1, &AutoConfirm(true)).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.items.is_empty());
    }

    fn first_names(items: &[User]) -> Vec<&str> {
        items.iter().map(|u| u.first_name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_survives_refresh_issued_before_it() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann", "Bob"]));
        list.load(1, "").await.unwrap();
        *h.source.fetch_delay.lock().unwrap() = Some(Duration::from_secs(1));

        let refresh = tokio::spawn({
            let list = list.clone();
            async move { list.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        list.edit(1, serde_json::json!({"firstName": "Zed"})).await.unwrap();
        refresh.await.unwrap().unwrap();

        let view = list.view().await;
        assert_eq!(first_names(&view.items), vec!["Zed", "Bob"]);
        assert!(!view.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_filter_keeps_refresh_in_flight() {
        let (list, h) = controller(FakeUsers::with_users(&["Ann", "Bob"]));
        list.load(1, "").await.unwrap();
        h.source.server.lock().unwrap().push(user(3, "Cat"));
        *h.source.fetch_delay.lock().unwrap() = Some(Duration::from_secs(1));

        let refresh = tokio::spawn({
            let list = list.clone();
            async move { list.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        list.load(1, "cat").await.unwrap();

        let view = list.view().await;
        assert!(view.items.is_empty());
        assert!(view.loading);

        refresh.await.unwrap().unwrap();

        let view = list.view().await;
        assert_eq!(ids(&view.items), vec![3]);
        assert_eq!(view.search_term, "cat");
        assert!(!view.loading);
        assert_eq!(list.snapshot().await.total_items, 3);
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_add_hidden_by_search_clears_term() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE[..5]));
        list.load(1, "ann").await.unwrap();

        list.add(form("Mia", "mia@example.com")).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.search_term, "");
        assert_eq!(view.current_page, 2);
        assert_eq!(first_names(&view.items), vec!["Mia"]);
    }

    #[tokio::test]
    async fn test_add_matching_search_keeps_term() {
        let (list, _h) = controller(FakeUsers::with_users(&TWELVE[..5]));
        list.load(1, "doe").await.unwrap();

        list.add(form("Mia", "mia@example.com")).await.unwrap();

        let view = list.view().await;
        assert_eq!(view.search_term, "doe");
        assert_eq!(view.current_page, 2);
        assert_eq!(first_names(&view.items), vec!["Mia"]);
    }
}
