//! Use case and router tests for the voting crate

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use kernel::error::kind::ErrorKind;
    use kernel::id::{FeatureId, UserId};
    use kernel::store::StoreError;

    use crate::application::{
        CastVoteUseCase, CreateFeatureUseCase, DeleteFeatureUseCase, FeatureInput,
        FeatureVotesUseCase, GetFeatureUseCase, ListFeaturesUseCase, RetractVoteUseCase,
        UpdateFeatureUseCase, VotingConfig,
    };
    use crate::domain::entities::Feature;
    use crate::error::VotingError;
    use crate::testing::InMemoryVotingRepository;

    const ALICE: UserId = UserId::from_i64(1);
    const BOB: UserId = UserId::from_i64(2);
    const CAROL: UserId = UserId::from_i64(3);

    fn setup() -> (Arc<InMemoryVotingRepository>, Arc<VotingConfig>) {
        let repo = InMemoryVotingRepository::new();
        repo.add_user(ALICE, "alice");
        repo.add_user(BOB, "bob");
        repo.add_user(CAROL, "carol");
        (Arc::new(repo), Arc::new(VotingConfig::default()))
    }

    fn input(title: &str, description: &str) -> FeatureInput {
        FeatureInput {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    async fn create(
        repo: &Arc<InMemoryVotingRepository>,
        config: &Arc<VotingConfig>,
        owner: UserId,
        title: &str,
    ) -> Feature {
        CreateFeatureUseCase::new(repo.clone(), config.clone())
            .execute(owner, input(title, "Some description"))
            .await
            .unwrap()
    }

    fn ids(features: &[Feature]) -> Vec<FeatureId> {
        features.iter().map(|f| f.id).collect()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (repo, config) = setup();
        let created = CreateFeatureUseCase::new(repo.clone(), config.clone())
            .execute(ALICE, input("  Dark mode ", "Add a dark theme"))
            .await
            .unwrap();

        let fetched = GetFeatureUseCase::new(repo, config)
            .execute(created.id)
            .await
            .unwrap();

        assert_eq!(fetched.title, "Dark mode");
        assert_eq!(fetched.description, "Add a dark theme");
        assert_eq!(fetched.created_by, ALICE);
        assert_eq!(fetched.created_by_username.as_deref(), Some("alice"));
        assert_eq!(fetched.vote_count, 0);
    }

    #[tokio::test]
    async fn create_reports_both_invalid_fields() {
        let (repo, config) = setup();
        let err = CreateFeatureUseCase::new(repo.clone(), config.clone())
            .execute(ALICE, input("", &"d".repeat(1001)))
            .await
            .unwrap_err();

        let violations = match err {
            VotingError::Validation(v) => v,
            other => panic!("expected validation error, got {other:?}"),
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_ref()).collect();
        assert_eq!(fields, ["title", "description"]);

        let listed = ListFeaturesUseCase::new(repo, config).execute().await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_feature_is_not_found() {
        let (repo, config) = setup();
        let err = GetFeatureUseCase::new(repo, config)
            .execute(FeatureId::from_i64(99))
            .await
            .unwrap_err();
        assert!(matches!(err, VotingError::FeatureNotFound));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn cast_increments_by_one_and_second_cast_is_duplicate() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());

        let out = cast.execute(BOB, feature.id).await.unwrap();
        assert_eq!(out.vote_count, 1);
        assert_eq!(out.vote.user_id, BOB);
        assert_eq!(out.vote.feature_id, feature.id);

        let err = cast.execute(BOB, feature.id).await.unwrap_err();
        assert!(matches!(err, VotingError::DuplicateVote));
        assert_eq!(err.status_code(), 409);

        let votes = FeatureVotesUseCase::new(repo.clone(), config)
            .execute(feature.id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 1);
        assert_eq!(repo.vote_rows(), 1);
    }

    #[tokio::test]
    async fn owner_may_vote_for_own_feature() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;

        let out = CastVoteUseCase::new(repo, config)
            .execute(ALICE, feature.id)
            .await
            .unwrap();
        assert_eq!(out.vote_count, 1);
    }

    #[tokio::test]
    async fn retract_decrements_and_second_retract_is_vote_not_found() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());
        cast.execute(BOB, feature.id).await.unwrap();
        cast.execute(CAROL, feature.id).await.unwrap();

        let retract = RetractVoteUseCase::new(repo.clone(), config.clone());
        assert_eq!(retract.execute(BOB, feature.id).await.unwrap(), 1);

        let err = retract.execute(BOB, feature.id).await.unwrap_err();
        assert!(matches!(err, VotingError::VoteNotFound));

        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(feature.id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 1);
    }

    #[tokio::test]
    async fn retract_then_recast_is_allowed() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());

        cast.execute(BOB, feature.id).await.unwrap();
        RetractVoteUseCase::new(repo.clone(), config.clone())
            .execute(BOB, feature.id)
            .await
            .unwrap();
        assert_eq!(cast.execute(BOB, feature.id).await.unwrap().vote_count, 1);
    }

    /// Existence is checked before the insert; voting for a missing feature
    /// never leaves a dangling row.
    #[tokio::test]
    async fn cast_vote_for_missing_feature_is_not_found() {
        let (repo, config) = setup();
        let err = CastVoteUseCase::new(repo.clone(), config)
            .execute(BOB, FeatureId::from_i64(42))
            .await
            .unwrap_err();

        assert!(matches!(err, VotingError::FeatureNotFound));
        assert_eq!(repo.vote_rows(), 0);
    }

    /// A caller whose pre-check raced another insert is stopped by the
    /// unique constraint, not by the pre-check.
    #[tokio::test]
    async fn unique_violation_on_insert_is_duplicate_vote() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());

        cast.execute(BOB, feature.id).await.unwrap();
        repo.serve_stale_vote_reads();

        let err = cast.execute(BOB, feature.id).await.unwrap_err();
        assert!(matches!(err, VotingError::DuplicateVote));
        assert_eq!(err.status_code(), 409);
        assert_eq!(repo.vote_rows(), 1);

        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(feature.id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_casts_store_exactly_one_vote() {
        const CALLERS: usize = 16;

        let (repo, config) = setup();
        let feature_id = create(&repo, &config, ALICE, "Dark mode").await.id;
        let use_case = Arc::new(CastVoteUseCase::new(repo.clone(), config.clone()));
        let barrier = Arc::new(tokio::sync::Barrier::new(CALLERS));

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let use_case = use_case.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    use_case.execute(BOB, feature_id).await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(VotingError::DuplicateVote) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, CALLERS - 1);
        assert_eq!(repo.vote_rows(), 1);
        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(feature_id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 1);
    }

    #[tokio::test]
    async fn only_the_creator_may_update_or_delete() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let update = UpdateFeatureUseCase::new(repo.clone(), config.clone());
        let delete = DeleteFeatureUseCase::new(repo.clone(), config.clone());

        let err = update
            .execute(feature.id, BOB, input("Light mode", "Hijacked"))
            .await
            .unwrap_err();
        assert!(matches!(err, VotingError::Forbidden(_)));

        let err = delete.execute(feature.id, BOB).await.unwrap_err();
        assert!(matches!(err, VotingError::Forbidden(_)));
        assert_eq!(err.status_code(), 403);

        let updated = update
            .execute(feature.id, ALICE, input("Dark mode v2", "Darker"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Dark mode v2");
        assert_eq!(updated.created_by, ALICE);
        assert!(updated.updated_at >= feature.updated_at);
    }

    #[tokio::test]
    async fn update_validates_before_looking_up_the_feature() {
        let (repo, config) = setup();
        let err = UpdateFeatureUseCase::new(repo, config)
            .execute(FeatureId::from_i64(7), BOB, input("", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, VotingError::Validation(_)));
    }

    #[tokio::test]
    async fn update_or_delete_of_missing_feature_is_not_found() {
        let (repo, config) = setup();
        let missing = FeatureId::from_i64(5);

        let err = UpdateFeatureUseCase::new(repo.clone(), config.clone())
            .execute(missing, ALICE, input("t", "d"))
            .await
            .unwrap_err();
        assert!(matches!(err, VotingError::FeatureNotFound));

        let err = DeleteFeatureUseCase::new(repo, config)
            .execute(missing, ALICE)
            .await
            .unwrap_err();
        assert!(matches!(err, VotingError::FeatureNotFound));
    }

    #[tokio::test]
    async fn update_keeps_the_live_count() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        CastVoteUseCase::new(repo.clone(), config.clone())
            .execute(BOB, feature.id)
            .await
            .unwrap();

        let updated = UpdateFeatureUseCase::new(repo, config)
            .execute(feature.id, ALICE, input("Dark mode", "Now with contrast"))
            .await
            .unwrap();
        assert_eq!(updated.vote_count, 1);
    }

    #[tokio::test]
    async fn delete_cascades_to_votes() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        CastVoteUseCase::new(repo.clone(), config.clone())
            .execute(BOB, feature.id)
            .await
            .unwrap();

        DeleteFeatureUseCase::new(repo.clone(), config.clone())
            .execute(feature.id, ALICE)
            .await
            .unwrap();

        assert_eq!(repo.vote_rows(), 0);
        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(feature.id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 0);
        assert!(votes.voters.is_empty());
    }

    #[tokio::test]
    async fn listing_is_reordered_when_a_vote_overtakes() {
        let (repo, config) = setup();
        let first = create(&repo, &config, ALICE, "First").await;
        let second = create(&repo, &config, ALICE, "Second").await;
        let list = ListFeaturesUseCase::new(repo.clone(), config.clone());
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());

        // Equal counts: the newer one leads (id breaks a timestamp tie)
        assert_eq!(ids(&list.execute().await.unwrap()), [second.id, first.id]);

        cast.execute(BOB, first.id).await.unwrap();
        assert_eq!(ids(&list.execute().await.unwrap()), [first.id, second.id]);

        cast.execute(BOB, second.id).await.unwrap();
        cast.execute(CAROL, second.id).await.unwrap();
        let listed = list.execute().await.unwrap();
        assert_eq!(ids(&listed), [second.id, first.id]);
        assert_eq!(listed[0].vote_count, 2);
        assert_eq!(listed[1].vote_count, 1);
    }

    #[tokio::test]
    async fn feature_votes_lists_voters_in_vote_order() {
        let (repo, config) = setup();
        let feature = create(&repo, &config, ALICE, "Dark mode").await;
        let cast = CastVoteUseCase::new(repo.clone(), config.clone());
        cast.execute(CAROL, feature.id).await.unwrap();
        cast.execute(BOB, feature.id).await.unwrap();

        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(feature.id)
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 2);
        let voters: Vec<UserId> = votes.voters.iter().map(|v| v.user_id).collect();
        assert_eq!(voters, [CAROL, BOB]);
        assert!(votes.voters[0].voted_at <= votes.voters[1].voted_at);
    }

    #[tokio::test]
    async fn feature_votes_for_unknown_feature_is_empty() {
        let (repo, config) = setup();
        let votes = FeatureVotesUseCase::new(repo, config)
            .execute(FeatureId::from_i64(404))
            .await
            .unwrap();
        assert_eq!(votes.vote_count, 0);
        assert!(votes.voters.is_empty());
    }

    #[tokio::test]
    async fn alice_and_bob() {
        let (repo, config) = setup();

        let feature = CreateFeatureUseCase::new(repo.clone(), config.clone())
            .execute(ALICE, input("Dark mode", "Add a dark theme"))
            .await
            .unwrap();
        assert_eq!(feature.id, FeatureId::from_i64(1));
        assert_eq!(feature.vote_count, 0);

        let cast = CastVoteUseCase::new(repo.clone(), config.clone());
        assert_eq!(cast.execute(BOB, feature.id).await.unwrap().vote_count, 1);
        assert!(matches!(
            cast.execute(BOB, feature.id).await,
            Err(VotingError::DuplicateVote)
        ));
        let get = GetFeatureUseCase::new(repo.clone(), config.clone());
        assert_eq!(get.execute(feature.id).await.unwrap().vote_count, 1);

        let delete = DeleteFeatureUseCase::new(repo.clone(), config.clone());
        assert!(matches!(
            delete.execute(feature.id, BOB).await,
            Err(VotingError::Forbidden(_))
        ));
        delete.execute(feature.id, ALICE).await.unwrap();

        assert!(matches!(
            get.execute(feature.id).await,
            Err(VotingError::FeatureNotFound)
        ));
    }

    #[tokio::test]
    async fn slow_store_surfaces_as_timeout() {
        let (repo, _) = setup();
        let config = Arc::new(VotingConfig::with_store_timeout(Duration::from_millis(20)));
        repo.stall_for(Duration::from_millis(500));

        let err = ListFeaturesUseCase::new(repo, config)
            .execute()
            .await
            .unwrap_err();

        assert!(matches!(err, VotingError::Store(StoreError::Timeout)));
        assert_eq!(err.kind(), ErrorKind::GatewayTimeout);
        assert!(err.is_retryable());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::AuthConfig;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::VotingConfig;
    use crate::presentation::router::{feature_router_generic, vote_router_generic};
    use crate::testing::InMemoryVotingRepository;

    struct TestApp {
        router: Router,
        auth: Arc<AuthConfig>,
    }

    impl TestApp {
        fn new() -> Self {
            let repo = InMemoryVotingRepository::new();
            repo.add_user(UserId::from_i64(1), "alice");
            repo.add_user(UserId::from_i64(2), "bob");

            let config = Arc::new(VotingConfig::default());
            let auth = Arc::new(AuthConfig::development());
            let router = Router::new()
                .nest(
                    "/api/features",
                    feature_router_generic(repo.clone(), config.clone(), auth.clone()),
                )
                .nest(
                    "/api/votes",
                    vote_router_generic(repo, config, auth.clone()),
                );

            Self { router, auth }
        }

        fn token(&self, user_id: i64, email: &str) -> String {
            self.auth.token_signer().issue(user_id, email).unwrap()
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut req = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let req = match body {
                Some(body) => req
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => req.body(Body::empty()),
            }
            .unwrap();

            let resp = self.router.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }
    }

    #[tokio::test]
    async fn feature_and_vote_flow() {
        let app = TestApp::new();
        let alice = app.token(1, "alice@x.com");
        let bob = app.token(2, "bob@x.com");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/features",
                Some(&alice),
                Some(json!({"title": "Dark mode", "description": "Add a dark theme"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Feature created successfully");
        assert_eq!(body["feature"]["created_by"], 1);
        assert_eq!(body["feature"]["created_by_username"], "alice");
        assert_eq!(body["feature"]["vote_count"], 0);
        let id = body["feature"]["id"].as_i64().unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/votes",
                Some(&bob),
                Some(json!({"featureId": id})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["voteCount"], 1);
        assert_eq!(body["vote"]["user_id"], 2);
        assert_eq!(body["message"], "Vote recorded successfully");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/votes",
                Some(&bob),
                Some(json!({"featureId": id})),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "You have already voted for this feature");

        let (status, body) = app
            .send(Method::GET, &format!("/api/votes/feature/{id}"), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["voteCount"], 1);
        assert_eq!(body["votes"], 1);
        assert_eq!(body["voters"][0]["userId"], 2);

        let (status, body) = app.send(Method::GET, "/api/features", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["features"][0]["vote_count"], 1);

        let (status, body) = app
            .send(Method::DELETE, &format!("/api/votes/{id}"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["voteCount"], 0);

        let (status, _) = app
            .send(Method::DELETE, &format!("/api/votes/{id}"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn mutations_require_authentication_before_ownership() {
        let app = TestApp::new();
        let alice = app.token(1, "alice@x.com");
        let (_, body) = app
            .send(
                Method::POST,
                "/api/features",
                Some(&alice),
                Some(json!({"title": "Dark mode", "description": "Add a dark theme"})),
            )
            .await;
        let id = body["feature"]["id"].as_i64().unwrap();

        let anonymous = [
            (Method::POST, "/api/features".to_string()),
            (Method::PUT, format!("/api/features/{id}")),
            (Method::DELETE, format!("/api/features/{id}")),
            (Method::POST, "/api/votes".to_string()),
            (Method::DELETE, format!("/api/votes/{id}")),
        ];
        for (method, uri) in anonymous {
            let (status, _) = app
                .send(method.clone(), &uri, None, Some(json!({})))
                .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let (status, _) = app
            .send(
                Method::DELETE,
                &format!("/api/features/{id}"),
                Some("garbage"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Still there
        let (status, _) = app
            .send(Method::GET, &format!("/api/features/{id}"), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_owner_gets_forbidden() {
        let app = TestApp::new();
        let alice = app.token(1, "alice@x.com");
        let bob = app.token(2, "bob@x.com");
        let (_, body) = app
            .send(
                Method::POST,
                "/api/features",
                Some(&alice),
                Some(json!({"title": "Dark mode", "description": "Add a dark theme"})),
            )
            .await;
        let id = body["feature"]["id"].as_i64().unwrap();

        let (status, body) = app
            .send(
                Method::PUT,
                &format!("/api/features/{id}"),
                Some(&bob),
                Some(json!({"title": "Mine now", "description": "x"})),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "You can only update your own features");

        let (status, _) = app
            .send(Method::DELETE, &format!("/api/features/{id}"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(Method::DELETE, &format!("/api/features/{id}"), Some(&alice), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Feature deleted successfully");

        let (status, _) = app
            .send(Method::GET, &format!("/api/features/{id}"), None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_input_lists_field_errors() {
        let app = TestApp::new();
        let alice = app.token(1, "alice@x.com");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/features",
                Some(&alice),
                Some(json!({"description": "No title"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "title");
        assert_eq!(body["errors"][0]["message"], "Title is required");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/votes",
                Some(&alice),
                Some(json!({"featureId": "zero"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "featureId");
    }

    #[tokio::test]
    async fn vote_for_missing_feature_is_not_found() {
        let app = TestApp::new();
        let bob = app.token(2, "bob@x.com");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/votes",
                Some(&bob),
                Some(json!({"featureId": 999})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Feature not found");
    }
}
