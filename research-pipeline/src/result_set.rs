use gummy_core::{ClassifiedPost, Sentiment};
use serde::Serialize;
use std::fmt;

/// Informational notice attached to a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    FiltersReverted { original_count: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FiltersReverted { original_count } => write!(
                f,
                "No results matched the filters. Showing all {} original results.",
                original_count
            ),
        }
    }
}

/// Posts currently shown plus the unfiltered set they were drawn from.
///
/// Every shown post also appears in the unfiltered set, which can be restored
/// at any time with [`ResultSet::show_all`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    shown: Vec<ClassifiedPost>,
    #[serde(skip)]
    original: Vec<ClassifiedPost>,
    filters_applied: bool,
    notice: Option<Notice>,
}

impl ResultSet {
    pub fn filtered(original: Vec<ClassifiedPost>, shown: Vec<ClassifiedPost>, filters_applied: bool) -> Self {
        Self {
            shown,
            original,
            filters_applied,
            notice: None,
        }
    }

    /// Shows the whole unfiltered set with a notice naming its size.
    pub fn reverted(original: Vec<ClassifiedPost>) -> Self {
        let notice = Notice::FiltersReverted {
            original_count: original.len(),
        };
        Self {
            shown: original.clone(),
            original,
            filters_applied: false,
            notice: Some(notice),
        }
    }

    pub fn shown(&self) -> &[ClassifiedPost] {
        &self.shown
    }

    pub fn original(&self) -> &[ClassifiedPost] {
        &self.original
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn filters_applied(&self) -> bool {
        self.filters_applied
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Discards the active filters.
    pub fn show_all(&mut self) {
        self.shown = self.original.clone();
        self.filters_applied = false;
        self.notice = None;
    }

    pub fn sentiment_tally(&self) -> SentimentTally {
        SentimentTally::count(&self.shown)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub mixed: usize,
}

impl SentimentTally {
    pub fn count(posts: &[ClassifiedPost]) -> Self {
        posts.iter().fold(Self::default(), |mut tally, post| {
            match post.classification.sentiment {
                Sentiment::Positive => tally.positive += 1,
                Sentiment::Neutral => tally.neutral += 1,
                Sentiment::Negative => tally.negative += 1,
                Sentiment::Mixed => tally.mixed += 1,
            }
            tally
        })
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
            Sentiment::Mixed => self.mixed,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.mixed
    }
}
