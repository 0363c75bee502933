//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Registered accounts. `username` carries a unique constraint.
    users (id) {
        id -> Int8,
        /// Login name (max 80 characters).
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        registered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes, each owned by one author.
    recipes (id) {
        id -> Int8,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Free-text tags, searched alongside the name.
        tags -> Varchar,
        ingredients -> Text,
        instructions -> Text,
        author_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User to recipe bookmarks, unique per `(user_id, recipe_id)`.
    favorites (id) {
        id -> Int8,
        user_id -> Int8,
        recipe_id -> Int8,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(favorites -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(favorites, recipes, users);
