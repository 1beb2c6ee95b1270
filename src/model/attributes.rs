// src/model/attributes.rs
//! Typed accessor over an element's XML attributes.

use serde::Serialize;
use std::collections::BTreeMap;

/// Named fields for the attributes the security rules read, plus every other
/// attribute keyed by its qualified name (`camunda:asyncBefore`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_users: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, String>,
}

/// Which named field a local attribute name feeds, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KnownAttribute {
    DelegateExpression,
    ScriptFormat,
    FormKey,
    Assignee,
    CandidateUsers,
}

impl KnownAttribute {
    pub(crate) fn from_local_name(local: &str) -> Option<Self> {
        match local {
            "delegateExpression" => Some(Self::DelegateExpression),
            "scriptFormat" => Some(Self::ScriptFormat),
            "formKey" => Some(Self::FormKey),
            "assignee" => Some(Self::Assignee),
            "candidateUsers" => Some(Self::CandidateUsers),
            _ => None,
        }
    }
}

impl Attributes {
    pub(crate) fn set_known(&mut self, which: KnownAttribute, value: String) {
        let slot = match which {
            KnownAttribute::DelegateExpression => &mut self.delegate_expression,
            KnownAttribute::ScriptFormat => &mut self.script_format,
            KnownAttribute::FormKey => &mut self.form_key,
            KnownAttribute::Assignee => &mut self.assignee,
            KnownAttribute::CandidateUsers => &mut self.candidate_users,
        };
        *slot = Some(value);
    }

    /// Looks up any attribute. Named fields answer to their local name,
    /// everything else to the qualified name it was written with.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let local = key.rsplit(':').next().unwrap_or(key);
        let named = match local {
            "delegateExpression" => self.delegate_expression.as_deref(),
            "script" | "scriptBody" => self.script_body.as_deref(),
            "scriptFormat" => self.script_format.as_deref(),
            "formKey" => self.form_key.as_deref(),
            "assignee" => self.assignee.as_deref(),
            "candidateUsers" => self.candidate_users.as_deref(),
            _ => None,
        };
        named.or_else(|| self.other.get(key).map(String::as_str))
    }

    /// True when the task names an assignee or candidate users with actual content.
    #[must_use]
    pub fn has_assignment(&self) -> bool {
        non_blank(self.assignee.as_deref()) || non_blank(self.candidate_users.as_deref())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_prefers_named_fields() {
        let mut attrs = Attributes::default();
        attrs.set_known(KnownAttribute::Assignee, "alice".into());
        attrs.other.insert("camunda:priority".into(), "5".into());

        assert_eq!(attrs.get("camunda:assignee"), Some("alice"));
        assert_eq!(attrs.get("assignee"), Some("alice"));
        assert_eq!(attrs.get("camunda:priority"), Some("5"));
        assert_eq!(attrs.get("priority"), None);
    }

    #[test]
    fn blank_assignee_is_not_an_assignment() {
        let mut attrs = Attributes::default();
        attrs.set_known(KnownAttribute::Assignee, "   ".into());
        assert!(!attrs.has_assignment());
        attrs.set_known(KnownAttribute::CandidateUsers, "bob,carol".into());
        assert!(attrs.has_assignment());
    }
}
