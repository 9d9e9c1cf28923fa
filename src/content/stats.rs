//! Dashboard statistics

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::Post;

/// Posts published in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

/// Short form of a post for "latest posts" lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub slug: String,
    pub date: NaiveDate,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            category: post.category.clone(),
            subcategory: post.subcategory.clone(),
            slug: post.slug.clone(),
            date: post.date,
        }
    }
}

/// Numbers shown on the blog dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_posts: usize,
    pub total_categories: usize,
    pub posts_this_month: usize,
    /// Oldest month first, ending with the month of `today`
    pub monthly: Vec<MonthlyCount>,
    pub latest: Vec<PostSummary>,
}

impl BlogStats {
    pub fn compute(
        posts: &[Post],
        category_count: usize,
        today: NaiveDate,
        months: u16,
        latest: usize,
    ) -> Self {
        let current = month_index(today);
        let count_in = |month: i32| {
            posts
                .iter()
                .filter(|p| month_index(p.date) == month)
                .count()
        };

        let monthly = (0..i32::from(months))
            .rev()
            .map(|back| {
                let month = current - back;
                MonthlyCount {
                    month: format!("{:04}-{:02}", month.div_euclid(12), month.rem_euclid(12) + 1),
                    count: count_in(month),
                }
            })
            .collect();

        let mut newest: Vec<&Post> = posts.iter().collect();
        newest.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        Self {
            total_posts: posts.len(),
            total_categories: category_count,
            posts_this_month: count_in(current),
            monthly,
            latest: newest.into_iter().take(latest).map(PostSummary::from).collect(),
        }
    }
}

/// Months since year 0, so month arithmetic is plain subtraction
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
