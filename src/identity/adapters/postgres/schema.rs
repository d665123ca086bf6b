//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalized email address, unique.
        #[max_length = 255]
        email -> Varchar,
        /// Role name.
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
