//! Diesel schema for task persistence.

diesel::table! {
    /// Named tasks with start and optional completion timestamps.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// When the task was started.
        started_at -> Timestamptz,
        /// When the task was completed, if it has been.
        completed_at -> Nullable<Timestamptz>,
    }
}
