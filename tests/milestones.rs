#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use littlewins::libs::clock::{FixedClock, YearMonth};
    use littlewins::libs::error::StoreError;
    use littlewins::Store;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MilestoneTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        store: Store,
        child_id: i64,
        activity_id: i64,
    }

    impl TestContext for MilestoneTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("littlewins.db");
            let mut store = Store::open(&db_path).with_clock(FixedClock(date(2024, 6, 10)));
            let child_id = store.add_child("Ava").unwrap();
            let activity_id = store.add_activity(child_id, "Brush teeth").unwrap();
            MilestoneTestContext {
                _temp_dir: temp_dir,
                db_path,
                store,
                child_id,
                activity_id,
            }
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_milestones_are_listed_by_points(ctx: &mut MilestoneTestContext) {
        ctx.store.add_milestone(ctx.child_id, "Bike ride", 20).unwrap();
        ctx.store.add_milestone(ctx.child_id, "Sticker", 0).unwrap();
        ctx.store.add_milestone(ctx.child_id, "Ice cream", 5).unwrap();

        let titles: Vec<String> = ctx
            .store
            .list_milestones_for_child(ctx.child_id)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Sticker", "Ice cream", "Bike ride"]);
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_add_milestone_validation(ctx: &mut MilestoneTestContext) {
        assert!(matches!(
            ctx.store.add_milestone(ctx.child_id, "Sticker", -1),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            ctx.store.add_milestone(ctx.child_id, " ", 3),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(ctx.store.add_milestone(99, "Sticker", 3), Err(StoreError::NotFound { entity: "child", id: 99 })));
        assert!(ctx.store.list_milestones_for_child(ctx.child_id).unwrap().is_empty());
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_monthly_points_only_count_current_month(ctx: &mut MilestoneTestContext) {
        let bed = ctx.store.add_activity(ctx.child_id, "Make bed").unwrap();
        let read = ctx.store.add_activity(ctx.child_id, "Read").unwrap();

        // Three points in May
        for activity in [ctx.activity_id, bed, read] {
            ctx.store.mark_daily_check(activity, ctx.child_id, date(2024, 5, 31), true).unwrap();
        }
        // Two points in June
        ctx.store.mark_daily_check(ctx.activity_id, ctx.child_id, date(2024, 6, 1), true).unwrap();
        ctx.store.mark_daily_check(bed, ctx.child_id, date(2024, 6, 9), true).unwrap();

        assert_eq!(ctx.store.current_month().to_string(), "2024-06");
        assert_eq!(ctx.store.get_monthly_points(ctx.child_id).unwrap(), 2);
        assert_eq!(
            ctx.store
                .get_monthly_points_for(ctx.child_id, YearMonth::new(2024, 5).unwrap())
                .unwrap(),
            3
        );
        assert_eq!(ctx.store.get_total_points(ctx.child_id).unwrap(), 5);
        assert_eq!(ctx.store.get_monthly_points(12345).unwrap(), 0);
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_mark_milestone_completed_once_per_month(ctx: &mut MilestoneTestContext) {
        let sticker = ctx.store.add_milestone(ctx.child_id, "Sticker", 1).unwrap();
        assert!(!ctx.store.is_milestone_completed(ctx.child_id, sticker).unwrap());

        assert!(ctx.store.mark_milestone_completed(ctx.child_id, sticker).unwrap());
        assert!(!ctx.store.mark_milestone_completed(ctx.child_id, sticker).unwrap());
        assert!(ctx.store.is_milestone_completed(ctx.child_id, sticker).unwrap());

        let completions = ctx.store.list_milestone_completions(ctx.child_id).unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].milestone_id, sticker);
        assert_eq!(completions[0].month, YearMonth::new(2024, 6).unwrap());

        // A new month starts uncompleted
        let july = Store::open(&ctx.db_path).with_clock(FixedClock(date(2024, 7, 1)));
        assert!(!july.is_milestone_completed(ctx.child_id, sticker).unwrap());
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_mark_unknown_milestone(ctx: &mut MilestoneTestContext) {
        assert!(matches!(
            ctx.store.mark_milestone_completed(ctx.child_id, 404),
            Err(StoreError::NotFound {
                entity: "milestone",
                id: 404
            })
        ));
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_mark_milestone_of_other_child_is_rejected(ctx: &mut MilestoneTestContext) {
        let ben = ctx.store.add_child("Ben").unwrap();
        let sticker = ctx.store.add_milestone(ctx.child_id, "Sticker", 1).unwrap();

        assert!(matches!(
            ctx.store.mark_milestone_completed(ben, sticker),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(ctx.store.list_milestone_completions(ben).unwrap().is_empty());
        assert!(!ctx.store.is_milestone_completed(ctx.child_id, sticker).unwrap());

        // Removing the owner leaves nothing for Ben either
        ctx.store.delete_child_cascade(ctx.child_id).unwrap();
        assert!(ctx.store.list_milestone_completions(ben).unwrap().is_empty());
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_evaluate_marks_reached_milestones(ctx: &mut MilestoneTestContext) {
        let small = ctx.store.add_milestone(ctx.child_id, "Sticker", 1).unwrap();
        let big = ctx.store.add_milestone(ctx.child_id, "Bike ride", 10).unwrap();

        let statuses = ctx.store.evaluate_milestones(ctx.child_id).unwrap();
        assert_eq!(statuses.len(), 2);
        assert!(statuses.iter().all(|s| !s.completed));

        ctx.store.mark_daily_check(ctx.activity_id, ctx.child_id, date(2024, 6, 10), true).unwrap();
        let statuses = ctx.store.evaluate_milestones(ctx.child_id).unwrap();
        assert_eq!(statuses[0].milestone.id, small);
        assert!(statuses[0].completed);
        assert_eq!(statuses[1].milestone.id, big);
        assert!(!statuses[1].completed);

        assert!(ctx.store.is_milestone_completed(ctx.child_id, small).unwrap());
        assert!(!ctx.store.is_milestone_completed(ctx.child_id, big).unwrap());
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_completion_is_sticky(ctx: &mut MilestoneTestContext) {
        let sticker = ctx.store.add_milestone(ctx.child_id, "Sticker", 1).unwrap();
        let day = date(2024, 6, 10);

        ctx.store.mark_daily_check(ctx.activity_id, ctx.child_id, day, true).unwrap();
        ctx.store.evaluate_milestones(ctx.child_id).unwrap();
        assert!(ctx.store.is_milestone_completed(ctx.child_id, sticker).unwrap());

        // Points drop below the threshold
        ctx.store.mark_daily_check(ctx.activity_id, ctx.child_id, day, false).unwrap();
        assert_eq!(ctx.store.get_monthly_points(ctx.child_id).unwrap(), 0);

        let statuses = ctx.store.evaluate_milestones(ctx.child_id).unwrap();
        assert!(statuses[0].completed);
        assert!(ctx.store.is_milestone_completed(ctx.child_id, sticker).unwrap());
        assert_eq!(ctx.store.list_milestone_completions(ctx.child_id).unwrap().len(), 1);
    }

    #[test_context(MilestoneTestContext)]
    #[test]
    fn test_delete_milestone_removes_completions(ctx: &mut MilestoneTestContext) {
        let sticker = ctx.store.add_milestone(ctx.child_id, "Sticker", 0).unwrap();
        let kept = ctx.store.add_milestone(ctx.child_id, "Ice cream", 0).unwrap();
        ctx.store.mark_milestone_completed(ctx.child_id, sticker).unwrap();
        ctx.store.mark_milestone_completed(ctx.child_id, kept).unwrap();

        ctx.store.delete_milestone(sticker).unwrap();

        let milestones = ctx.store.list_milestones_for_child(ctx.child_id).unwrap();
        assert_eq!(milestones.len(), 1);
        assert_eq!(milestones[0].id, kept);

        let completions = ctx.store.list_milestone_completions(ctx.child_id).unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].milestone_id, kept);
    }
}
