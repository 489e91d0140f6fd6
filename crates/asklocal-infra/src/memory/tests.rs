//! Service behaviour against the in-memory store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use asklocal_core::ErrorKind;
use asklocal_core::domain::{
    Location, NewAnswer, NewLocation, NewRecommendation, NewUser, Recommendation,
};
use asklocal_core::error::RepoError;
use asklocal_core::ports::{
    BaseRepository, CategoryRepository, DuplicateLookup, LocationRepository,
    RecommendationRepository, Repositories,
};
use asklocal_core::services::{
    CategoryInput, EditOutcome, LocationInput, PostQuestion, Posted, QueryOutcome,
    ReferenceResolver, ResolverPolicy, Services, ThreadEngine, VoteAction, VoteOutcome,
};

use super::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    repos: Repositories,
    services: Services,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::seeded());
    let repos = Repositories::from_store(store.clone());
    let services = Services::new(&repos, ResolverPolicy::new("AU")).unwrap();
    Fixture {
        store,
        repos,
        services,
    }
}

async fn add_user(fx: &Fixture, username: &str) -> i32 {
    fx.repos
        .users
        .insert(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "!".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn question(location: LocationInput, category: CategoryInput, body: &str) -> PostQuestion {
    PostQuestion {
        location,
        category,
        body: Some(body.to_string()),
    }
}

async fn post_question(fx: &Fixture, author_id: i32, location: LocationInput, category: &str) -> i32 {
    fx.services
        .assembler
        .post_question(
            author_id,
            question(
                location,
                CategoryInput::by_name(category),
                "Where is the best coffee around here?",
            ),
        )
        .await
        .unwrap()
        .id
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ids(outcome: QueryOutcome) -> Vec<i32> {
    match outcome {
        QueryOutcome::Matches(questions) => questions.iter().map(|q| q.id).collect(),
        QueryOutcome::Empty => Vec::new(),
    }
}

/// Delegates to the store, except that the first duplicate lookup misses, as
/// if another request inserted the row between the check and the insert.
struct LateWriter {
    store: Arc<InMemoryStore>,
    missed: AtomicBool,
}

impl LateWriter {
    fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            missed: AtomicBool::new(false),
        }
    }

    fn miss_once(&self) -> bool {
        !self.missed.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseRepository<Location> for LateWriter {
    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, RepoError> {
        BaseRepository::<Location>::find_by_id(&*self.store, id).await
    }

    async fn insert(&self, draft: NewLocation) -> Result<Location, RepoError> {
        BaseRepository::<Location>::insert(&*self.store, draft).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        BaseRepository::<Location>::delete(&*self.store, id).await
    }
}

#[async_trait]
impl DuplicateLookup<Location> for LateWriter {
    async fn find_equivalent(
        &self,
        candidate: &NewLocation,
        ignore: &[&'static str],
    ) -> Result<Option<Location>, RepoError> {
        if self.miss_once() {
            return Ok(None);
        }
        DuplicateLookup::<Location>::find_equivalent(&*self.store, candidate, ignore).await
    }
}

impl LocationRepository for LateWriter {}

#[async_trait]
impl BaseRepository<Recommendation> for LateWriter {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recommendation>, RepoError> {
        BaseRepository::<Recommendation>::find_by_id(&*self.store, id).await
    }

    async fn insert(&self, draft: NewRecommendation) -> Result<Recommendation, RepoError> {
        BaseRepository::<Recommendation>::insert(&*self.store, draft).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        BaseRepository::<Recommendation>::delete(&*self.store, id).await
    }
}

#[async_trait]
impl DuplicateLookup<Recommendation> for LateWriter {
    async fn find_equivalent(
        &self,
        candidate: &NewRecommendation,
        ignore: &[&'static str],
    ) -> Result<Option<Recommendation>, RepoError> {
        if self.miss_once() {
            return Ok(None);
        }
        DuplicateLookup::<Recommendation>::find_equivalent(&*self.store, candidate, ignore).await
    }
}

#[async_trait]
impl RecommendationRepository for LateWriter {
    async fn find_by_answers(&self, answer_ids: &[i32]) -> Result<Vec<Recommendation>, RepoError> {
        self.store.find_by_answers(answer_ids).await
    }
}

#[tokio::test]
async fn test_open_country_location_created_once() {
    let fx = fixture();
    let before = fx.store.counts().await.locations;
    let input = LocationInput::by_fields("nz", "auckland", "1011", "ponsonby");

    let first = fx.services.resolver.resolve_location(input.clone()).await.unwrap();
    let second = fx.services.resolver.resolve_location(input).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);
    assert_eq!(fx.store.counts().await.locations, before + 1);

    let stored = fx.repos.locations.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(stored.country_code, "NZ");
    assert_eq!(stored.state, "Auckland");
    assert_eq!(stored.suburb, "Ponsonby");
}

#[tokio::test]
async fn test_closed_country_refuses_new_location() {
    let fx = fixture();
    let before = fx.store.counts().await.locations;

    let err = fx
        .services
        .resolver
        .resolve_location(LocationInput::by_fields("AU", "Nsw", "2000", "Sydney"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.store.counts().await.locations, before);
}

#[tokio::test]
async fn test_closed_country_reuses_seeded_location() {
    let fx = fixture();
    let resolved = fx
        .services
        .resolver
        .resolve_location(LocationInput::by_fields("au", "NSW", "2007", "ULTIMO"))
        .await
        .unwrap();
    assert!(!resolved.created);
}

#[tokio::test]
async fn test_unknown_country_is_not_found() {
    let fx = fixture();
    let err = fx
        .services
        .resolver
        .resolve_location(LocationInput::by_fields("zz", "Nowhere", "0000", "Nothing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("Country"));
}

#[tokio::test]
async fn test_location_input_shapes() {
    let fx = fixture();
    let resolver = &fx.services.resolver;

    let mut mixed = LocationInput::by_fields("NZ", "Auckland", "1011", "Ponsonby");
    mixed.location_id = Some(1);
    let err = resolver.resolve_location(mixed).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let partial = LocationInput {
        country_code: Some("NZ".to_string()),
        suburb: Some("Ponsonby".to_string()),
        ..LocationInput::default()
    };
    let err = resolver.resolve_location(partial).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("state"));

    let err = resolver
        .resolve_location(LocationInput::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = resolver
        .resolve_location(LocationInput::by_id(9999))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let found = resolver.resolve_location(LocationInput::by_id(1)).await.unwrap();
    assert_eq!(found.id, 1);
}

#[tokio::test]
async fn test_category_resolution() {
    let fx = fixture();
    let resolver = &fx.services.resolver;

    let both = CategoryInput {
        category_id: Some(1),
        category_name: Some("Housing".to_string()),
    };
    assert_eq!(
        resolver.resolve_category(both).await.unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        resolver
            .resolve_category(CategoryInput::default())
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Validation
    );

    let by_name = resolver
        .resolve_category(CategoryInput::by_name("food & drink"))
        .await
        .unwrap();
    let by_id = resolver
        .resolve_category(CategoryInput::by_id(by_name.id))
        .await
        .unwrap();
    assert_eq!(by_name, by_id);

    assert_eq!(
        resolver
            .resolve_category(CategoryInput::by_name("food"))
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        resolver
            .resolve_category(CategoryInput::by_id(404))
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn test_categories_are_seeded() {
    let fx = fixture();

    let categories = fx.services.resolver.categories().await.unwrap();

    assert_eq!(categories.len(), 11);
    assert_eq!(categories[0].name, "Accommodation");
    assert!(categories.iter().any(|c| c.name == "Health & Medicine"));
}

#[tokio::test]
async fn test_short_question_creates_nothing() {
    let fx = fixture();
    let before = fx.store.counts().await;

    let err = fx
        .services
        .assembler
        .post_question(
            1,
            question(
                LocationInput::by_fields("NZ", "Otago", "9016", "Dunedin"),
                CategoryInput::by_name("Transport"),
                "Bus?",
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(fx.store.counts().await, before);
}

#[tokio::test]
async fn test_bad_category_creates_no_location() {
    let fx = fixture();
    let before = fx.store.counts().await;

    let err = fx
        .services
        .assembler
        .post_question(
            1,
            question(
                LocationInput::by_fields("NZ", "Otago", "9016", "Dunedin"),
                CategoryInput::by_name("Nightlife"),
                "Which bars stay open after midnight?",
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.store.counts().await, before);
}

#[tokio::test]
async fn test_post_question_stores_resolved_references() {
    let fx = fixture();
    let created = fx
        .services
        .assembler
        .post_question(
            1,
            question(
                LocationInput::by_fields("nz", "wellington", "6011", "te aro"),
                CategoryInput::by_name("transport"),
                "How late do the buses run on Friday?",
            ),
        )
        .await
        .unwrap();

    assert_eq!(created.author_id, 1);
    let location = fx
        .repos
        .locations
        .find_by_id(created.location_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(location.suburb, "Te Aro");
    let category = fx
        .repos
        .categories
        .find_by_id(created.category_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(category.name, "Transport");
}

#[tokio::test]
async fn test_identical_answer_is_a_duplicate() {
    let fx = fixture();
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Food & Drink").await;
    let body = Some("The cafe on the corner opens at six.".to_string());

    let first = fx
        .services
        .assembler
        .post_answer(1, q, None, body.clone())
        .await
        .unwrap();
    let second = fx
        .services
        .assembler
        .post_answer(1, q, None, body)
        .await
        .unwrap();

    assert!(matches!(first, Posted::Created(_)));
    assert!(second.is_duplicate());
    assert_eq!(first.record().id, second.record().id);
    assert_eq!(fx.store.counts().await.answers, 1);
}

#[tokio::test]
async fn test_answer_references_are_checked() {
    let fx = fixture();
    let q1 = post_question(&fx, 1, LocationInput::by_id(1), "Housing").await;
    let q2 = post_question(&fx, 1, LocationInput::by_id(2), "Housing").await;
    let assembler = &fx.services.assembler;
    let body = || Some("Check the community noticeboard first.".to_string());

    let err = assembler.post_answer(1, 999, None, body()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = assembler.post_answer(1, q1, Some(999), body()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let parent = assembler
        .post_answer(1, q2, None, body())
        .await
        .unwrap()
        .into_inner();
    let err = assembler
        .post_answer(1, q1, Some(parent.id), body())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = assembler
        .post_answer(1, q1, None, Some("short".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_vote_toggle() {
    let fx = fixture();
    let voter = add_user(&fx, "voter").await;
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Money").await;
    let answer = fx
        .services
        .assembler
        .post_answer(1, q, None, Some("The ATM inside the station is free.".to_string()))
        .await
        .unwrap()
        .into_inner();
    let threads = &fx.services.threads;

    let first = threads
        .toggle_recommendation(voter, answer.id, VoteAction::Vote)
        .await
        .unwrap();
    assert!(matches!(first, VoteOutcome::Recommended(_)));
    let second = threads
        .toggle_recommendation(voter, answer.id, VoteAction::Vote)
        .await
        .unwrap();
    assert_eq!(second, VoteOutcome::AlreadyRecommended);
    assert_eq!(fx.store.counts().await.recommendations, 1);

    let removed = threads
        .toggle_recommendation(voter, answer.id, VoteAction::RemoveVote)
        .await
        .unwrap();
    assert_eq!(removed, VoteOutcome::Removed);
    let again = threads
        .toggle_recommendation(voter, answer.id, VoteAction::RemoveVote)
        .await
        .unwrap();
    assert_eq!(again, VoteOutcome::NothingToRemove);
    assert_eq!(fx.store.counts().await.recommendations, 0);

    let err = threads
        .toggle_recommendation(voter, 999, VoteAction::Vote)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_thread_details() {
    let fx = fixture();
    let voter = add_user(&fx, "reader").await;
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Health & Medicine").await;
    let assembler = &fx.services.assembler;
    let threads = &fx.services.threads;

    let root = assembler
        .post_answer(1, q, None, Some("The clinic on King St takes walk-ins.".to_string()))
        .await
        .unwrap()
        .into_inner();
    let reply = assembler
        .post_answer(voter, q, Some(root.id), Some("They close early on Saturdays though.".to_string()))
        .await
        .unwrap()
        .into_inner();
    threads
        .toggle_recommendation(voter, root.id, VoteAction::Vote)
        .await
        .unwrap();

    let details = threads.question_details(q).await.unwrap();
    assert_eq!(details.question.id, q);
    assert_eq!(details.thread.len(), 2);
    assert_eq!(details.thread.roots().map(|a| a.id).collect::<Vec<_>>(), vec![root.id]);
    assert_eq!(details.recommendations_for(root.id), 1);
    assert_eq!(details.recommendations_for(reply.id), 0);

    let answer = threads.answer_details(root.id).await.unwrap();
    assert_eq!(answer.recommendations, 1);
    assert_eq!(answer.replies.iter().map(|a| a.id).collect::<Vec<_>>(), vec![reply.id]);

    assert_eq!(threads.list_answers().await.unwrap().len(), 2);

    let err = threads.question_details(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = threads.answer_details(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_query_filters() {
    let fx = fixture();
    let other = add_user(&fx, "kiwi").await;
    let sydney = post_question(&fx, 1, LocationInput::by_id(1), "Food & Drink").await;
    let auckland = post_question(
        &fx,
        other,
        LocationInput::by_fields("NZ", "Auckland", "1010", "Auckland Central"),
        "Transport",
    )
    .await;
    let queries = &fx.services.queries;

    let all = ids(queries.query(&HashMap::new()).await.unwrap());
    assert_eq!(all, vec![sydney, auckland]);

    let lower = queries.query(&params(&[("country_code", "au")])).await.unwrap();
    let upper = queries.query(&params(&[("country_code", "AU")])).await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(ids(lower), vec![sydney]);

    let by_country = queries.query(&params(&[("country", "new zealand")])).await.unwrap();
    assert_eq!(ids(by_country), vec![auckland]);

    let by_user = queries
        .query(&params(&[("username", "kiwi"), ("suburb", "AUCKLAND CENTRAL")]))
        .await
        .unwrap();
    assert_eq!(ids(by_user), vec![auckland]);

    let by_category = queries
        .query(&params(&[("category_name", "food & drink"), ("user_id", "1")]))
        .await
        .unwrap();
    assert_eq!(ids(by_category), vec![sydney]);

    let none = queries
        .query(&params(&[("country_code", "NZ"), ("category_name", "Food & Drink")]))
        .await
        .unwrap();
    assert_eq!(none, QueryOutcome::Empty);

    let bad_id = queries.query(&params(&[("location_id", "one")])).await.unwrap();
    assert_eq!(bad_id, QueryOutcome::Empty);
}

#[tokio::test]
async fn test_unknown_filter_key_rejects_request() {
    let fx = fixture();
    post_question(&fx, 1, LocationInput::by_id(1), "Venues").await;

    let err = fx
        .services
        .queries
        .query(&params(&[("country_code", "AU"), ("not_a_field", "x")]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    for key in fx.services.queries.table().legal_keys() {
        assert!(err.to_string().contains(key));
    }
}

#[tokio::test]
async fn test_questions_by_category() {
    let fx = fixture();
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Shopping").await;
    let shopping = fx
        .repos
        .categories
        .find_by_name("Shopping")
        .await
        .unwrap()
        .unwrap();

    let by_name = fx.services.queries.by_category("shopping").await.unwrap();
    let by_id = fx
        .services
        .queries
        .by_category(&shopping.id.to_string())
        .await
        .unwrap();
    assert_eq!(ids(by_name), vec![q]);
    assert_eq!(ids(by_id), vec![q]);
}

#[tokio::test]
async fn test_edit_and_delete_are_author_only() {
    let fx = fixture();
    let intruder = add_user(&fx, "intruder").await;
    let q = post_question(&fx, 1, LocationInput::by_id(3), "Services").await;
    let threads = &fx.services.threads;

    let err = threads
        .edit_question(intruder, q, Some("Rewritten by someone else entirely".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let same = threads
        .edit_question(1, q, Some("Where is the best coffee around here?".to_string()))
        .await
        .unwrap();
    assert!(matches!(same, EditOutcome::NotModified(_)));

    let updated = threads
        .edit_question(1, q, Some("Where is the nearest post office open late?".to_string()))
        .await
        .unwrap();
    let EditOutcome::Updated(updated) = updated else {
        panic!("expected an update");
    };
    assert_eq!(updated.body, "Where is the nearest post office open late?");

    let err = threads.delete_question(intruder, q).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    threads.delete_question(1, q).await.unwrap();
    assert_eq!(fx.store.counts().await.questions, 0);
}

#[tokio::test]
async fn test_delete_answer_cascades_to_replies() {
    let fx = fixture();
    let replier = add_user(&fx, "replier").await;
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Trades").await;
    let assembler = &fx.services.assembler;
    let threads = &fx.services.threads;

    let root = assembler
        .post_answer(1, q, None, Some("Call the plumber on Crown Street.".to_string()))
        .await
        .unwrap()
        .into_inner();
    let reply = assembler
        .post_answer(replier, q, Some(root.id), Some("They were great for our leak too.".to_string()))
        .await
        .unwrap()
        .into_inner();
    assembler
        .post_answer(1, q, Some(reply.id), Some("Glad to hear it worked out for you!".to_string()))
        .await
        .unwrap();
    threads
        .toggle_recommendation(replier, root.id, VoteAction::Vote)
        .await
        .unwrap();

    let details = threads.question_details(q).await.unwrap();
    assert_eq!(details.thread.len(), 3);
    assert_eq!(details.recommendations_for(root.id), 1);
    let depths: Vec<usize> = details.thread.walk().iter().map(|(d, _)| *d).collect();
    assert_eq!(depths, vec![0, 1, 2]);

    let answer = threads.answer_details(root.id).await.unwrap();
    assert_eq!(answer.replies.len(), 1);
    assert_eq!(answer.recommendations, 1);

    let err = threads.delete_answer(replier, root.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    threads.delete_answer(1, root.id).await.unwrap();

    let counts = fx.store.counts().await;
    assert_eq!(counts.answers, 0);
    assert_eq!(counts.recommendations, 0);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let fx = fixture();
    let leaving = add_user(&fx, "leaving").await;
    let q = post_question(&fx, leaving, LocationInput::by_id(1), "Housing").await;
    let other_q = post_question(&fx, 1, LocationInput::by_id(2), "Housing").await;
    let assembler = &fx.services.assembler;

    let theirs = assembler
        .post_answer(leaving, other_q, None, Some("Try the agency next to the station.".to_string()))
        .await
        .unwrap()
        .into_inner();
    assembler
        .post_answer(1, other_q, Some(theirs.id), Some("That agency closed down last year.".to_string()))
        .await
        .unwrap();
    assembler
        .post_answer(1, q, None, Some("Rents are lower further from the beach.".to_string()))
        .await
        .unwrap();

    let err = fx.services.users.delete_user(1, leaving).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    fx.services.users.delete_user(leaving, leaving).await.unwrap();
    let counts = fx.store.counts().await;
    assert_eq!(counts.questions, 1);
    assert_eq!(counts.answers, 0);
    assert!(fx.repos.questions.find_by_id(q).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_enforces_location_natural_key() {
    let fx = fixture();
    let draft = NewLocation {
        country_code: "AU".to_string(),
        state: "Nsw".to_string(),
        postcode: "2007".to_string(),
        suburb: "Ultimo".to_string(),
    };
    let err = fx.repos.locations.insert(draft).await.unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_location_insert_conflict_reuses_existing_row() {
    let fx = fixture();
    let input = LocationInput::by_fields("NZ", "Otago", "9016", "Dunedin");
    let stored = fx.services.resolver.resolve_location(input.clone()).await.unwrap();
    let before = fx.store.counts().await.locations;

    let repos = Repositories {
        locations: Arc::new(LateWriter::new(fx.store.clone())),
        ..fx.repos.clone()
    };
    let resolver = ReferenceResolver::new(&repos, ResolverPolicy::new("AU"));
    let resolved = resolver.resolve_location(input).await.unwrap();

    assert_eq!(resolved.id, stored.id);
    assert!(!resolved.created);
    assert_eq!(fx.store.counts().await.locations, before);
}

#[tokio::test]
async fn test_vote_insert_conflict_is_already_recommended() {
    let fx = fixture();
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Trades").await;
    let answer = fx
        .services
        .assembler
        .post_answer(1, q, None, Some("The plumber on Bay Road fixed ours fast.".to_string()))
        .await
        .unwrap()
        .into_inner();
    fx.services
        .threads
        .toggle_recommendation(1, answer.id, VoteAction::Vote)
        .await
        .unwrap();

    let repos = Repositories {
        recommendations: Arc::new(LateWriter::new(fx.store.clone())),
        ..fx.repos.clone()
    };
    let outcome = ThreadEngine::new(&repos)
        .toggle_recommendation(1, answer.id, VoteAction::Vote)
        .await
        .unwrap();

    assert_eq!(outcome, VoteOutcome::AlreadyRecommended);
    assert_eq!(fx.store.counts().await.recommendations, 1);
}

#[tokio::test]
async fn test_unknown_voter_is_a_conflict() {
    let fx = fixture();
    let q = post_question(&fx, 1, LocationInput::by_id(1), "Trades").await;
    let answer = fx
        .services
        .assembler
        .post_answer(1, q, None, Some("Ask at the hardware store counter.".to_string()))
        .await
        .unwrap()
        .into_inner();

    let err = fx
        .services
        .threads
        .toggle_recommendation(999, answer.id, VoteAction::Vote)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fx.store.counts().await.recommendations, 0);
}

#[tokio::test]
async fn test_unknown_author_cannot_post() {
    let fx = fixture();
    let kept = post_question(&fx, 1, LocationInput::by_id(1), "Transport").await;

    let err = fx
        .services
        .assembler
        .post_question(
            999,
            question(
                LocationInput::by_id(1),
                CategoryInput::by_name("Transport"),
                "Where do the night buses leave from?",
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = fx
        .services
        .assembler
        .post_answer(999, kept, None, Some("From the stop outside town hall.".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let all = fx.services.queries.query(&HashMap::new()).await.unwrap();
    assert_eq!(ids(all), vec![kept]);
    assert_eq!(fx.store.counts().await.answers, 0);
}

#[tokio::test]
async fn test_store_enforces_foreign_keys() {
    let fx = fixture();
    let body = "An answer to a question that is gone.".to_string();

    let err = fx
        .repos
        .answers
        .insert(NewAnswer::new(1, 999, None, body))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));

    let draft = NewLocation {
        country_code: "ZZ".to_string(),
        state: "Nowhere".to_string(),
        postcode: "0000".to_string(),
        suburb: "Nowhere".to_string(),
    };
    let err = fx.repos.locations.insert(draft).await.unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}
