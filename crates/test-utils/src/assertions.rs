// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion assertions

use lsp_types::CompletionItem;

/// Find a completion item by label
pub fn find_item<'a>(items: &'a [CompletionItem], label: &str) -> Option<&'a CompletionItem> {
    items.iter().find(|item| item.label == label)
}

/// Assert that a label is present and return its item
pub fn assert_has_label<'a>(items: &'a [CompletionItem], label: &str) -> &'a CompletionItem {
    match find_item(items, label) {
        Some(item) => item,
        None => {
            let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
            panic!("Expected completion '{}', found {:?}", label, labels);
        }
    }
}

/// Assert that a label is absent
pub fn assert_no_label(items: &[CompletionItem], label: &str) {
    assert!(
        find_item(items, label).is_none(),
        "Unexpected completion '{}'",
        label
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> CompletionItem {
        CompletionItem {
            label: label.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_item() {
        let items = vec![item("#a"), item("#b")];
        assert_eq!(assert_has_label(&items, "#b").label, "#b");
        assert_no_label(&items, "#c");
    }

    #[test]
    #[should_panic(expected = "Expected completion '#c'")]
    fn test_missing_label_panics() {
        assert_has_label(&[item("#a")], "#c");
    }
}
