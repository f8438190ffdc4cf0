//! Exposition document parsing shared by the aggregator tests.

#![allow(dead_code)]

use std::collections::HashMap;

/// Find one sample in a text exposition document by metric name and exact
/// label set; returns its value. Label order inside the braces does not
/// matter.
pub fn sample(doc: &str, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
    let want: HashMap<&str, &str> = labels.iter().copied().collect();

    for line in doc.lines() {
        if line.starts_with('#') {
            continue;
        }
        let Some(rest) = line.strip_prefix(name) else {
            continue;
        };

        let (label_part, value_part) = if let Some(rest) = rest.strip_prefix('{') {
            let Some(split) = rest.split_once("} ") else {
                continue;
            };
            split
        } else if let Some(value) = rest.strip_prefix(' ') {
            ("", value)
        } else {
            continue;
        };

        let mut got = HashMap::new();
        for pair in label_part.split(',').filter(|p| !p.is_empty()) {
            let Some((k, v)) = pair.split_once('=') else {
                continue;
            };
            got.insert(k, v.trim_matches('"'));
        }

        if got == want {
            return value_part.trim().parse().ok();
        }
    }

    None
}
