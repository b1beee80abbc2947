//! Curated candidate lists for high-value topics.
//!
//! Used only when every engine comes back empty. A topic matches when one
//! of its keywords appears in the query as a whole word (or whole phrase
//! for multi-word keywords), case-insensitively.

use serde::{Deserialize, Serialize};

/// One curated topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFallback {
    /// Human-readable topic label, used as the candidate title.
    pub label: String,
    /// Trigger words or phrases.
    pub keywords: Vec<String>,
    /// Sources to try, best first.
    pub urls: Vec<String>,
}

/// Injected table of curated topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicFallbacks {
    /// Topics checked in order; the first match wins.
    pub topics: Vec<TopicFallback>,
}

impl Default for TopicFallbacks {
    fn default() -> Self {
        let topic = |label: &str, keywords: &[&str], urls: &[&str]| TopicFallback {
            label: label.to_owned(),
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            urls: urls.iter().map(|u| (*u).to_owned()).collect(),
        };
        Self {
            topics: vec![
                topic(
                    "Indian Institutes of Technology",
                    &["iit", "iits", "indian institute of technology"],
                    &[
                        "https://en.wikipedia.org/wiki/Indian_Institutes_of_Technology",
                        "https://www.iitsystem.ac.in/",
                    ],
                ),
                topic(
                    "National Institutes of Technology",
                    &["nit", "nits", "national institute of technology"],
                    &["https://en.wikipedia.org/wiki/National_Institutes_of_Technology"],
                ),
                topic(
                    "Joint Entrance Examination",
                    &["jee", "jee main", "jee advanced"],
                    &[
                        "https://jeemain.nta.nic.in/",
                        "https://jeeadv.ac.in/",
                        "https://en.wikipedia.org/wiki/Joint_Entrance_Examination",
                    ],
                ),
                topic(
                    "NEET",
                    &["neet"],
                    &[
                        "https://neet.nta.nic.in/",
                        "https://en.wikipedia.org/wiki/National_Eligibility_cum_Entrance_Test_(Undergraduate)",
                    ],
                ),
                topic(
                    "NIRF rankings",
                    &["nirf"],
                    &["https://www.nirfindia.org/"],
                ),
            ],
        }
    }
}

impl TopicFallbacks {
    /// An empty table that never matches.
    pub fn none() -> Self {
        Self { topics: Vec::new() }
    }

    /// Find the first topic whose keyword occurs in `query`.
    pub fn lookup(&self, query: &str) -> Option<&TopicFallback> {
        let padded = padded_words(query);
        self.topics.iter().find(|topic| {
            topic.keywords.iter().any(|keyword| {
                let keyword = padded_words(keyword);
                !keyword.trim().is_empty() && padded.contains(&keyword)
            })
        })
    }
}

/// Lowercase `text`, split on non-alphanumerics and rejoin as ` w1 w2 ... `.
fn padded_words(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}
