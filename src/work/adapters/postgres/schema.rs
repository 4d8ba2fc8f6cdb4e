//! Diesel schema for work-item persistence.

diesel::table! {
    /// Work items correlated from push, pull-request, and deployment events.
    work_items (id) {
        /// Internal work-item identifier.
        id -> Uuid,
        /// Branch that originated the work.
        #[max_length = 255]
        branch -> Varchar,
        /// Pull request number, once one is opened.
        pull_request -> Nullable<BigInt>,
        /// Merge commit hash, once the work is integrated.
        #[max_length = 64]
        merge_commit -> Nullable<Varchar>,
        /// Earliest commit timestamp observed at push time.
        started_at -> Timestamptz,
        /// Merge timestamp, set together with the merge commit.
        merged_at -> Nullable<Timestamptz>,
        /// Production deployment timestamp.
        deployed_at -> Nullable<Timestamptz>,
        /// Work lifecycle state.
        #[max_length = 50]
        state -> Varchar,
        /// Record-creation timestamp; orders latest-by-branch lookup.
        created_at -> Timestamptz,
    }
}
