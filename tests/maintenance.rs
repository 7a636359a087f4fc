#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use littlewins::db::maintenance::OrphanReport;
    use littlewins::libs::clock::FixedClock;
    use littlewins::Store;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MaintenanceTestContext {
        _temp_dir: TempDir,
        store: Store,
        today: NaiveDate,
    }

    impl TestContext for MaintenanceTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
            let store = Store::open(temp_dir.path().join("littlewins.db")).with_clock(FixedClock(today));
            MaintenanceTestContext {
                _temp_dir: temp_dir,
                store,
                today,
            }
        }
    }

    /// Adds a child with one checked activity and one completed milestone.
    fn seed_child(ctx: &mut MaintenanceTestContext, name: &str) -> i64 {
        let child = ctx.store.add_child(name).unwrap();
        let activity = ctx.store.add_activity(child, "Brush teeth").unwrap();
        ctx.store.mark_daily_check(activity, child, ctx.today, true).unwrap();
        let milestone = ctx.store.add_milestone(child, "Sticker", 1).unwrap();
        ctx.store.mark_milestone_completed(child, milestone).unwrap();
        child
    }

    fn count(store: &Store, table: &str) -> i64 {
        store
            .connection()
            .unwrap()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_clean_orphans_on_clean_store(ctx: &mut MaintenanceTestContext) {
        seed_child(ctx, "Ava");
        let report = ctx.store.clean_orphans().unwrap();
        assert_eq!(report, OrphanReport::default());
        assert_eq!(count(&ctx.store, "rewards"), 1);
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_clean_orphans_converges(ctx: &mut MaintenanceTestContext) {
        let ava = seed_child(ctx, "Ava");
        let ben = seed_child(ctx, "Ben");

        // Remove the child row alone, leaving everything it owned behind
        ctx.store
            .connection()
            .unwrap()
            .execute("DELETE FROM children WHERE id = ?1", [ava])
            .unwrap();

        let report = ctx.store.clean_orphans().unwrap();
        assert_eq!(
            report,
            OrphanReport {
                activities: 1,
                daily_checks: 1,
                rewards: 1,
                milestones: 1,
                milestone_completions: 1,
            }
        );
        assert_eq!(report.total(), 5);

        assert!(ctx.store.list_activities_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_rewards_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_milestones_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_milestone_completions(ava).unwrap().is_empty());
        assert_eq!(count(&ctx.store, "daily_checks"), 1);

        // Ben is untouched
        assert_eq!(ctx.store.get_monthly_points(ben).unwrap(), 1);
        assert_eq!(ctx.store.list_milestone_completions(ben).unwrap().len(), 1);

        // Second run finds nothing
        assert_eq!(ctx.store.clean_orphans().unwrap().total(), 0);
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_clean_orphans_drops_rewards_of_deleted_activity(ctx: &mut MaintenanceTestContext) {
        let ava = ctx.store.add_child("Ava").unwrap();
        let teeth = ctx.store.add_activity(ava, "Brush teeth").unwrap();
        ctx.store.mark_daily_check(teeth, ava, ctx.today, true).unwrap();

        ctx.store.delete_activity(teeth).unwrap();
        assert_eq!(ctx.store.list_rewards_for_child(ava).unwrap().len(), 1);

        let report = ctx.store.clean_orphans().unwrap();
        assert_eq!(report.rewards, 1);
        assert!(ctx.store.list_rewards_for_child(ava).unwrap().is_empty());
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_reset_all_data(ctx: &mut MaintenanceTestContext) {
        let ava = seed_child(ctx, "Ava");
        ctx.store.save_setting("soundEnabled", "false").unwrap();

        ctx.store.reset_all_data().unwrap();

        assert!(ctx.store.list_children().unwrap().is_empty());
        assert!(ctx.store.list_activities_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.get_daily_checks_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_rewards_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_milestones_for_child(ava).unwrap().is_empty());
        assert!(ctx.store.list_milestone_completions(ava).unwrap().is_empty());
        assert!(ctx.store.list_settings().unwrap().is_empty());
        for table in ["children", "activities", "daily_checks", "rewards", "milestones", "milestone_completions", "settings"] {
            assert_eq!(count(&ctx.store, table), 0, "table {}", table);
        }
        assert!(ctx.store.is_available());
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_reset_rolls_back_on_failure(ctx: &mut MaintenanceTestContext) {
        let ava = seed_child(ctx, "Ava");
        ctx.store
            .connection()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER keep_children BEFORE DELETE ON children
                 BEGIN SELECT RAISE(ABORT, 'children are locked'); END;",
            )
            .unwrap();

        assert!(ctx.store.reset_all_data().is_err());

        // Tables cleared before the failing statement are restored as well
        for table in ["children", "activities", "daily_checks", "rewards", "milestones", "milestone_completions"] {
            assert_eq!(count(&ctx.store, table), 1, "table {}", table);
        }
        assert_eq!(ctx.store.get_monthly_points(ava).unwrap(), 1);
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_startup_skips_cleanup_by_default(ctx: &mut MaintenanceTestContext) {
        let ava = seed_child(ctx, "Ava");
        ctx.store
            .connection()
            .unwrap()
            .execute("DELETE FROM children WHERE id = ?1", [ava])
            .unwrap();

        assert!(!ctx.store.startup());
        assert_eq!(count(&ctx.store, "activities"), 1);
    }

    #[test_context(MaintenanceTestContext)]
    #[test]
    fn test_startup_cleans_with_monthly_retention(ctx: &mut MaintenanceTestContext) {
        let ava = seed_child(ctx, "Ava");
        ctx.store.set_monthly_retention(true).unwrap();
        ctx.store
            .connection()
            .unwrap()
            .execute("DELETE FROM children WHERE id = ?1", [ava])
            .unwrap();

        assert!(ctx.store.startup());
        for table in ["activities", "daily_checks", "rewards", "milestones", "milestone_completions"] {
            assert_eq!(count(&ctx.store, table), 0, "table {}", table);
        }
        // Retention setting itself is kept
        assert!(ctx.store.preferences().unwrap().monthly_retention);
    }
}
