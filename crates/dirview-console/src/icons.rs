//! Tree row icons.

use dirview_api::DirectoryObject;

use crate::dom::Element;

/// Glyph and color for objects of one `objectClass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRule {
    /// `objectClass` value that selects this rule.
    pub object_class: &'static str,
    /// Font Awesome glyph class.
    pub glyph: &'static str,
    /// Text color class.
    pub color: &'static str,
}

/// Evaluated in order; the first class the object has wins.
pub const ICON_RULES: &[IconRule] = &[
    IconRule {
        object_class: "group",
        glyph: "fa-users",
        color: "text-blue-500",
    },
    IconRule {
        object_class: "container",
        glyph: "fa-box",
        color: "text-yellow-500",
    },
    IconRule {
        object_class: "computer",
        glyph: "fa-desktop",
        color: "text-blue-500",
    },
    IconRule {
        object_class: "user",
        glyph: "fa-user-circle",
        color: "text-blue-500",
    },
    IconRule {
        object_class: "organizationalUnit",
        glyph: "fa-building",
        color: "text-yellow-500",
    },
];

/// Used when no rule matches.
pub const DEFAULT_ICON: IconRule = IconRule {
    object_class: "",
    glyph: "fa-folder",
    color: "text-blue-500",
};

const FOLDER_PATH: &str =
    "M3 7v4a1 1 0 001 1h3m10 0h3a1 1 0 001-1V7m-4 0V5a2 2 0 00-2-2H8a2 2 0 00-2 2v2m0 0h12";

/// Rule for an object.
#[must_use]
pub fn rule_for(object: &DirectoryObject) -> &'static IconRule {
    ICON_RULES
        .iter()
        .find(|rule| object.has_object_class(rule.object_class))
        .unwrap_or(&DEFAULT_ICON)
}

/// `<i>` glyph for a child row.
#[must_use]
pub fn object_icon(object: &DirectoryObject) -> Element {
    let rule = rule_for(object);
    Element::new("i").with_class(&format!("fas {} w-4 h-4 mr-1 {}", rule.glyph, rule.color))
}

/// Amber folder used for naming-context rows.
#[must_use]
pub fn root_folder_icon() -> Element {
    Element::new("svg")
        .with_class("w-4 h-4 text-yellow-500")
        .with_attr("fill", "none")
        .with_attr("stroke", "currentColor")
        .with_attr("viewBox", "0 0 24 24")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_child(Element::new("path").with_attr("d", FOLDER_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirview_api::{AttributeValue, Attributes};

    fn with_classes(classes: &[&str]) -> DirectoryObject {
        let mut attributes = Attributes::new();
        attributes.insert("objectClass", AttributeValue::from(classes.to_vec()));
        DirectoryObject::new("CN=x,DC=corp,DC=local", attributes)
    }

    #[test]
    fn group_wins_over_later_classes() {
        let object = with_classes(&["top", "user", "group"]);
        assert_eq!(rule_for(&object).glyph, "fa-users");
    }

    #[test]
    fn computer_is_checked_before_user() {
        let object = with_classes(&["top", "person", "user", "computer"]);
        assert_eq!(rule_for(&object).glyph, "fa-desktop");
    }

    #[test]
    fn containers_and_ous_are_amber() {
        assert_eq!(rule_for(&with_classes(&["container"])).color, "text-yellow-500");
        let ou = object_icon(&with_classes(&["top", "organizationalUnit"]));
        assert!(ou.has_class("fa-building"));
        assert!(ou.has_class("text-yellow-500"));
    }

    #[test]
    fn unknown_or_missing_class_uses_folder() {
        assert_eq!(rule_for(&with_classes(&["dnsZone"])), &DEFAULT_ICON);
        let bare = DirectoryObject::new("DC=x", Attributes::new());
        assert_eq!(object_icon(&bare).attr("class"), Some("fas fa-folder w-4 h-4 mr-1 text-blue-500"));
    }
}
