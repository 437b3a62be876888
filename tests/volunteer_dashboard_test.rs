//! Integration tests for the volunteer dashboard

mod test_utils;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use volunteer_hub::backend::Backend;
    use volunteer_hub::dashboard::VolunteerDashboard;
    use volunteer_hub::models::{ParticipantRecord, VolunteerAssignment};
    use volunteer_hub::session::{Role, Session};
    use volunteer_hub::state::CardState;

    use crate::test_utils::{FakeBackend, event, volunteer_session};

    fn assigned() -> FakeBackend {
        let mut backend = FakeBackend::new().with_events(vec![
            event(3, "Zoo", "2024-05-01"),
            event(4, "Park", "2024-05-02"),
        ]);
        backend.event_students = vec![ParticipantRecord {
            student_first_name: "Ana".to_string(),
            student_last_name: "Doe".to_string(),
            parent_first_name: "Pat".to_string(),
            parent_last_name: "Doe".to_string(),
            parent_email: "pat@example.com".to_string(),
            parent_phone: "555-0100".to_string(),
        }];
        backend.event_volunteers = vec![VolunteerAssignment {
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            email: "sam@example.com".to_string(),
            phone: None,
        }];
        backend
    }

    async fn loaded(backend: &Arc<FakeBackend>) -> VolunteerDashboard {
        let shared: Arc<dyn Backend> = backend.clone();
        let mut dashboard = VolunteerDashboard::new(volunteer_session(), shared);
        dashboard.initialize().await.unwrap();
        dashboard
    }

    #[tokio::test]
    async fn it_loads_assigned_events() {
        let backend = Arc::new(assigned());
        let dashboard = loaded(&backend).await;

        assert_eq!(
            backend.calls_with("fetch_events"),
            vec!["/volunteers/volunteer/8"]
        );
        assert_eq!(dashboard.state().events().len(), 2);
        assert!(dashboard.state().find("3").unwrap().participants.is_none());
    }

    #[tokio::test]
    async fn it_loads_participants_once() {
        let backend = Arc::new(assigned());
        let mut dashboard = loaded(&backend).await;

        assert_eq!(dashboard.toggle_card("3").await.unwrap(), CardState::Expanded);
        assert_eq!(backend.calls_with("fetch_event_students"), vec!["3"]);
        assert_eq!(backend.calls_with("fetch_event_volunteers"), vec!["3"]);

        let participants = dashboard
            .state()
            .find("3")
            .and_then(|e| e.participants.clone())
            .unwrap();
        assert_eq!(participants.students[0].student_name(), "Ana Doe");
        assert_eq!(participants.volunteers[0].name(), "Sam Lee");

        // Collapse and expand again, nothing is refetched
        assert_eq!(dashboard.toggle_card("3").await.unwrap(), CardState::Collapsed);
        assert_eq!(dashboard.toggle_card("3").await.unwrap(), CardState::Expanded);
        assert_eq!(backend.calls("fetch_event_students"), 1);
        assert_eq!(backend.calls("fetch_event_volunteers"), 1);
    }

    #[tokio::test]
    async fn it_stores_no_participants_when_one_fetch_fails() {
        let backend = Arc::new(assigned());
        backend.fail("fetch_event_volunteers");
        let mut dashboard = loaded(&backend).await;

        assert!(dashboard.toggle_card("3").await.is_err());

        // The card opened but nothing partial landed in the cache
        assert_eq!(dashboard.state().card_state("3"), CardState::Expanded);
        assert!(dashboard.state().find("3").unwrap().participants.is_none());

        // The next expand tries again
        backend.recover("fetch_event_volunteers");
        dashboard.close_card();
        dashboard.toggle_card("3").await.unwrap();
        assert!(dashboard.state().find("3").unwrap().participants.is_some());
        assert_eq!(backend.calls("fetch_event_volunteers"), 2);
    }

    #[tokio::test]
    async fn it_declines_locally() {
        let backend = Arc::new(assigned());
        let mut dashboard = loaded(&backend).await;

        dashboard.decline(4).unwrap();
        dashboard.decline(4).unwrap();

        assert!(dashboard.is_declined(4));
        assert!(!dashboard.is_declined(3));
        assert_eq!(dashboard.state().annotations().len(), 1);
        // Declining an unknown assignment is rejected
        assert!(dashboard.decline(99).unwrap_err().is_precondition());
    }

    #[tokio::test]
    async fn it_keeps_events_when_reload_fails() {
        let backend = Arc::new(assigned());
        let mut dashboard = loaded(&backend).await;
        backend.fail("fetch_events");

        assert!(dashboard.initialize().await.is_err());
        assert_eq!(dashboard.state().events().len(), 2);
    }

    #[tokio::test]
    async fn it_reloads_for_a_different_user() {
        let backend = Arc::new(assigned());
        let mut dashboard = loaded(&backend).await;
        dashboard.decline(4).unwrap();
        dashboard.toggle_card("3").await.unwrap();

        let other = Session::new("other-token", "99", Role::Volunteer, false);
        dashboard.session_changed(other).await.unwrap();

        assert_eq!(
            backend.calls_with("fetch_events"),
            vec!["/volunteers/volunteer/8", "/volunteers/volunteer/99"]
        );
        // Nothing of the previous user survives the switch
        assert!(!dashboard.is_declined(4));
        assert!(dashboard.state().selection().is_none());
        assert!(dashboard.state().find("3").unwrap().participants.is_none());
    }

    #[tokio::test]
    async fn it_clears_the_cache_on_sign_out() {
        let backend = Arc::new(assigned());
        let mut dashboard = loaded(&backend).await;

        dashboard.session_changed(Session::default()).await.unwrap();

        assert!(dashboard.state().events().is_empty());
        assert!(dashboard.state().is_loading());
        assert_eq!(backend.calls("fetch_events"), 1);
    }
}
