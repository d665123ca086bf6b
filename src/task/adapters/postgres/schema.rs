//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Trimmed title.
        #[max_length = 100]
        title -> Varchar,
        /// Trimmed description.
        #[max_length = 500]
        description -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Assignee user identifier.
        assigned_to -> Uuid,
        /// Creator user identifier.
        created_by -> Uuid,
        /// Due instant.
        due_date -> Timestamptz,
        /// Completion timestamp while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Tag set as a JSON array.
        tags -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
