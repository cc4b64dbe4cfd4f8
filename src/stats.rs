use chrono::{DateTime, Utc};

use crate::age::{self, IntervalBreakdown};
use crate::bsky::Profile;
use crate::error::{Error, Result};
use crate::milestone;

/// Everything the profile page shows, derived in one pass from a profile and
/// the current time.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub name: String,
    pub handle: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub followers: i64,
    pub follows: i64,

    pub created_at: DateTime<Utc>,
    pub age: IntervalBreakdown,
    pub age_days: i64,
    pub age_years: i32,

    pub next_anniversary: DateTime<Utc>,
    pub until_anniversary: IntervalBreakdown,
    pub anniversary_days: u64,

    pub post_count: u64,
    /// Posts per day since the account was created; `None` on its first day
    pub average_posts: Option<f64>,
    pub next_milestone: u64,
    pub posts_until_milestone: u64,
    /// Posts per day needed to reach the milestone by the next anniversary;
    /// `None` when the anniversary is today
    pub daily_posts_needed: Option<u64>,
}

impl ProfileStats {
    pub fn compute(profile: &Profile, now: DateTime<Utc>) -> Result<Self> {
        let created_at = profile.created_at.ok_or_else(|| Error::MissingCreatedAt {
            handle: profile.handle.clone(),
        })?;

        let age = age::compute_interval(now, created_at);
        let age_days = (now - created_at).num_days();
        let age_years = age::whole_years_between(now, created_at);

        let next_anniversary = age::next_occurrence(created_at, now);
        let until_anniversary = age::compute_interval(now, next_anniversary);
        let anniversary_days = (now - next_anniversary).num_days().unsigned_abs();

        let next_milestone = milestone::next_milestone(profile.posts_count)?;
        // next_milestone has already rejected negative counts
        let post_count = profile.posts_count.unsigned_abs();
        let posts_until_milestone = next_milestone - post_count;

        let average_posts = (age_days > 0).then(|| post_count as f64 / age_days as f64);
        let daily_posts_needed =
            (anniversary_days > 0).then(|| posts_until_milestone.div_ceil(anniversary_days));

        Ok(Self {
            name: profile
                .display_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| profile.handle.clone()),
            handle: profile.handle.clone(),
            description: profile.description.clone().filter(|d| !d.trim().is_empty()),
            avatar: profile.avatar.clone(),
            followers: profile.followers_count,
            follows: profile.follows_count,
            created_at,
            age,
            age_days,
            age_years,
            next_anniversary,
            until_anniversary,
            anniversary_days,
            post_count,
            average_posts,
            next_milestone,
            posts_until_milestone,
            daily_posts_needed,
        })
    }

    /// Which anniversary comes next: 1 for an account younger than a year.
    pub fn anniversary_number(&self) -> u32 {
        self.age_years.unsigned_abs() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_profile() -> Profile {
        Profile {
            did: "did:plc:wez2ivc3yh75q3ejlas7kcqv".to_string(),
            handle: "alextorrance.co.uk".to_string(),
            display_name: Some("Alex Torrance".to_string()),
            description: Some("The Idiot".to_string()),
            avatar: None,
            created_at: Some(Utc.with_ymd_and_hms(2023, 9, 2, 20, 50, 8).unwrap()),
            followers_count: 365,
            follows_count: 380,
            posts_count: 283,
        }
    }

    #[test]
    fn test_sample_profile() {
        let now = Utc.with_ymd_and_hms(2024, 10, 20, 12, 0, 0).unwrap();
        let stats = ProfileStats::compute(&sample_profile(), now).unwrap();

        assert_eq!(stats.name, "Alex Torrance");
        assert_eq!(stats.age.text(), "1 year, 1 month and 17 days");
        assert_eq!(stats.age_years, 1);
        assert_eq!(stats.anniversary_number(), 2);
        assert_eq!(
            stats.next_anniversary,
            Utc.with_ymd_and_hms(2025, 9, 2, 20, 50, 8).unwrap()
        );
        assert_eq!(stats.until_anniversary.text(), "10 months and 13 days");
        assert_eq!(stats.anniversary_days, 317);

        assert_eq!(stats.next_milestone, 300);
        assert_eq!(stats.posts_until_milestone, 17);
        assert_eq!(stats.daily_posts_needed, Some(1));
        assert_eq!(stats.age_days, 413);
        let average = stats.average_posts.unwrap();
        assert!((average - 283.0 / 413.0).abs() < 1e-9);
    }

    #[test]
    fn test_anniversary_today() {
        let now = Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap();
        let stats = ProfileStats::compute(&sample_profile(), now).unwrap();

        assert_eq!(stats.anniversary_days, 0);
        assert!(stats.until_anniversary.is_zero());
        assert_eq!(stats.daily_posts_needed, None);
        assert_eq!(stats.age_years, 0);
        assert_eq!(stats.anniversary_number(), 1);
    }

    #[test]
    fn test_first_day_has_no_average() {
        let mut profile = sample_profile();
        profile.posts_count = 3;
        let now = Utc.with_ymd_and_hms(2023, 9, 3, 8, 0, 0).unwrap();
        let stats = ProfileStats::compute(&profile, now).unwrap();

        assert_eq!(stats.age_days, 0);
        assert_eq!(stats.average_posts, None);
        assert_eq!(stats.posts_until_milestone, 0);
    }

    #[test]
    fn test_blank_display_name_falls_back_to_handle() {
        let mut profile = sample_profile();
        profile.display_name = Some("  ".to_string());
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let stats = ProfileStats::compute(&profile, now).unwrap();
        assert_eq!(stats.name, "alextorrance.co.uk");
    }

    #[test]
    fn test_missing_created_at() {
        let mut profile = sample_profile();
        profile.created_at = None;
        let err = ProfileStats::compute(&profile, Utc::now()).unwrap_err();
        assert!(matches!(err, Error::MissingCreatedAt { .. }));
    }

    #[test]
    fn test_negative_post_count() {
        let mut profile = sample_profile();
        profile.posts_count = -5;
        let err = ProfileStats::compute(&profile, Utc::now()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
