//! Behaviour of the in-memory repositories.

use super::*;
use crate::domain::RecipeDraft;
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: Username::new(name).expect("username"),
        password_hash: PasswordHash::generate("pw").expect("hash"),
        registered_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

fn new_recipe(author_id: UserId, name: &str, tags: &str) -> NewRecipe {
    NewRecipe {
        author_id,
        draft: RecipeDraft::try_from_parts(name, tags, "things", "steps").expect("draft"),
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

#[rstest]
#[tokio::test]
async fn duplicate_username_is_rejected(store: MemoryStore) {
    let first = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("first registration");
    let err = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect_err("second registration");

    assert!(matches!(err, UserPersistenceError::DuplicateUsername { .. }));
    let found = store
        .find_credentials(&Username::new("alice").expect("username"))
        .await
        .expect("lookup")
        .expect("alice exists");
    assert_eq!(found.user_id, first.id());
}

#[rstest]
#[tokio::test]
async fn ids_are_assigned_in_order(store: MemoryStore) {
    let alice = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("alice");
    let bob = UserRepository::create(&store, &new_user("bob"))
        .await
        .expect("bob");

    assert_eq!(alice.id().get(), 1);
    assert_eq!(bob.id().get(), 2);
}

#[rstest]
#[tokio::test]
async fn recipe_requires_existing_author(store: MemoryStore) {
    let ghost = UserId::new(41).expect("id");
    let err = RecipeRepository::create(&store, &new_recipe(ghost, "Soup", ""))
        .await
        .expect_err("unknown author");

    assert_eq!(err, RecipePersistenceError::missing_author(41_i64));
    assert!(store.list_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn listings_filter_by_author_and_search_term(store: MemoryStore) {
    let alice = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("alice");
    let bob = UserRepository::create(&store, &new_user("bob"))
        .await
        .expect("bob");
    for (author, name, tags) in [
        (alice.id(), "Chocolate Cake", "dessert"),
        (bob.id(), "Vanilla Pie", "dessert"),
        (alice.id(), "Mole", "savoury, CHOCOLATE"),
    ] {
        RecipeRepository::create(&store, &new_recipe(author, name, tags))
            .await
            .expect("recipe");
    }

    let by_alice = store.list_by_author(&alice.id()).await.expect("by author");
    let names: Vec<_> = by_alice.iter().map(Recipe::name).collect();
    assert_eq!(names, ["Chocolate Cake", "Mole"]);

    let found = store
        .search(&SearchQuery::new(Some("chocolate")))
        .await
        .expect("search");
    let names: Vec<_> = found.iter().map(Recipe::name).collect();
    assert_eq!(names, ["Chocolate Cake", "Mole"]);

    let blank = store.search(&SearchQuery::new(Some(""))).await.expect("search");
    assert!(blank.is_empty());
}

#[rstest]
#[tokio::test]
async fn favorite_add_is_idempotent(store: MemoryStore) {
    let alice = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("alice");
    let recipe = RecipeRepository::create(&store, &new_recipe(alice.id(), "Cake", "sweet"))
        .await
        .expect("recipe");

    let first = store.add(&alice.id(), &recipe.id()).await.expect("first add");
    let second = store.add(&alice.id(), &recipe.id()).await.expect("second add");

    assert_eq!(first, second);
    assert!(store.exists(&alice.id(), &recipe.id()).await.expect("exists"));
    let listed = store.list_for_user(&alice.id()).await.expect("list");
    assert_eq!(
        listed,
        vec![FavoriteRecipe {
            recipe_id: recipe.id(),
            recipe_name: "Cake".to_owned(),
            recipe_tags: "sweet".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test]
async fn favorite_rejects_dangling_references(store: MemoryStore) {
    let alice = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("alice");
    let missing_recipe = RecipeId::new(99).expect("id");

    let err = store
        .add(&alice.id(), &missing_recipe)
        .await
        .expect_err("missing recipe");
    assert!(matches!(err, FavoritePersistenceError::MissingReference { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_favorites_for_one_pair_store_one_row(store: MemoryStore) {
    let alice = UserRepository::create(&store, &new_user("alice"))
        .await
        .expect("alice");
    let recipe = RecipeRepository::create(&store, &new_recipe(alice.id(), "Cake", ""))
        .await
        .expect("recipe");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let (user_id, recipe_id) = (alice.id(), recipe.id());
            tokio::spawn(async move { store.add(&user_id, &recipe_id).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("task").expect("add"));
    }

    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(store.list_for_user(&alice.id()).await.expect("list").len(), 1);
}
