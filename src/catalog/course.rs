//! Normalized course records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single offered course, already normalized by the catalog loader.
///
/// Evaluation only ever reads these records; nothing downstream mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique, stable identifier within a catalog.
    pub id: String,

    /// Structured code, conventionally `<PREFIX>-<digit>-<token>-<flags>-<seq>`.
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// Credit value. Missing credit counts as zero.
    #[serde(default)]
    pub credits: f64,

    /// Leading letters of the code, upper-cased.
    #[serde(default)]
    pub prefix: String,

    /// Quarters derived from the code's flag segment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quarters: Vec<Quarter>,

    /// Opaque pass-through data from the raw catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_course_data: Option<RawCourseData>,
}

impl Course {
    /// Create a course with the given id, code and credits.
    ///
    /// The prefix and quarters are derived from the code.
    pub fn new(id: impl Into<String>, code: impl Into<String>, credits: f64) -> Self {
        let code = code.into();
        Self {
            id: id.into(),
            prefix: super::loader::derive_prefix(&code),
            quarters: super::loader::derive_quarters(&code),
            code,
            name: String::new(),
            description: String::new(),
            credits,
            raw_course_data: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach subject category tags from the raw catalog.
    pub fn with_subject_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_course_data = Some(RawCourseData {
            subject_category_ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        });
        self
    }

    /// Subject category tags, empty when the raw data carries none.
    pub fn subject_category_ids(&self) -> &[String] {
        self.raw_course_data
            .as_ref()
            .map(|raw| raw.subject_category_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the course is offered in the given quarter.
    pub fn is_offered_in(&self, quarter: Quarter) -> bool {
        self.quarters.contains(&quarter)
    }
}

/// Raw catalog data carried along with a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourseData {
    /// Tags matched by `subjectCategoryIdsFromRaw` identification rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_category_ids: Vec<String>,

    /// Every other field, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawCourseData {
    /// Interpret an arbitrary raw value.
    ///
    /// Anything but an object is treated as absent. A `subjectCategoryIds`
    /// that is not an array contributes no tags; non-string tags are dropped.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(mut extra) = value else {
            return None;
        };

        let subject_category_ids = match extra.remove("subjectCategoryIds") {
            Some(serde_json::Value::Array(tags)) => tags
                .into_iter()
                .filter_map(|tag| match tag {
                    serde_json::Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            subject_category_ids,
            extra,
        })
    }
}

/// Academic quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter for a zero-based position in the code's flag segment.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        f.write_str(label)
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "Q1" | "1" => Ok(Quarter::Q1),
            "Q2" | "2" => Ok(Quarter::Q2),
            "Q3" | "3" => Ok(Quarter::Q3),
            "Q4" | "4" => Ok(Quarter::Q4),
            _ => Err(format!("unknown quarter: {}", s)),
        }
    }
}
