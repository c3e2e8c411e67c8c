use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::formats::XmlElement;
use crate::utils::error::{Result, RosterError};

pub const STUDENT_TAG: &str = "student";
pub const ROSTER_TAG: &str = "students";

/// A caller-owned, ordered list of students.
pub type Roster = Vec<Student>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    /// Kept as text: group identifiers may carry leading zeros or letters.
    pub group_number: String,
    pub performance: Vec<i32>,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        group_number: impl Into<String>,
        performance: Vec<i32>,
    ) -> Self {
        Self {
            name: name.into(),
            group_number: group_number.into(),
            performance,
        }
    }

    pub fn contains_grade(&self, grade: i32) -> bool {
        self.performance.contains(&grade)
    }

    /// Grades joined with `separator`, e.g. `"5, 4, 3"`.
    pub fn performance_text(&self, separator: &str) -> String {
        self.performance
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut data = HashMap::new();
        data.insert("name".to_string(), serde_json::Value::String(self.name.clone()));
        data.insert(
            "group_number".to_string(),
            serde_json::Value::String(self.group_number.clone()),
        );
        data.insert(
            "performance".to_string(),
            serde_json::Value::Array(self.performance.iter().map(|&g| g.into()).collect()),
        );
        data
    }

    pub fn from_dict(data: &HashMap<String, serde_json::Value>) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> =
            data.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| RosterError::data_format(format!("invalid student mapping: {}", e)))
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new(STUDENT_TAG);
        element.push(XmlElement::with_text("name", self.name.as_str()));
        element.push(XmlElement::with_text("group_number", self.group_number.as_str()));
        element.push(XmlElement::with_text("performance", self.performance_text(",")));
        element
    }

    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let name = child_text(element, "name")?;
        let group_number = child_text(element, "group_number")?;
        let performance = parse_performance(child_text(element, "performance")?)?;

        Ok(Self {
            name: name.to_string(),
            group_number: group_number.to_string(),
            performance,
        })
    }
}

fn child_text<'a>(element: &'a XmlElement, tag: &str) -> Result<&'a str> {
    element
        .find(tag)
        .map(|child| child.text.as_str())
        .ok_or_else(|| RosterError::data_format(format!("missing <{}> element", tag)))
}

/// Parse comma-separated integer grades. Blank text means no grades.
pub fn parse_performance(text: &str) -> Result<Vec<i32>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|token| {
            token.trim().parse::<i32>().map_err(|_| {
                tracing::debug!("rejected grade token {:?}", token);
                RosterError::data_format("invalid performance data")
            })
        })
        .collect()
}
