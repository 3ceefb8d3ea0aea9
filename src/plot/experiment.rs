//! Per-residue decorations shared by the experiment templates: status
//! colours, text marks and the paramagnetic tag.

use std::collections::BTreeMap;

use super::{MarkAnchor, Orientation, TextMark};

/// Recolours `colors` where the matching condition has an entry in `map`.
///
/// Items without a mapped condition keep their colour.
pub fn set_item_colors<'a, I>(colors: &mut [String], conditions: I, map: &BTreeMap<String, String>)
where
    I: IntoIterator<Item = &'a str>,
{
    for (color, condition) in colors.iter_mut().zip(conditions) {
        if let Some(new_color) = map.get(condition) {
            color.clone_from(new_color);
        }
    }
}

/// Text marks for every value whose condition has an entry in `marks`.
///
/// Marks sit past the bar end: above positive bars and below negative
/// ones, or right and left when bars grow sideways. Zero bars take the
/// positive side when bars grow up and the centre otherwise.
pub fn text_marker<'a, I>(
    values: &[f64],
    conditions: I,
    marks: &BTreeMap<String, String>,
    size: f64,
    orientation: Orientation,
) -> Vec<TextMark>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .iter()
        .zip(conditions)
        .enumerate()
        .filter_map(|(i, (&value, condition))| {
            let text = marks.get(condition)?;
            let value = if value.is_nan() { 0.0 } else { value };
            let anchor = if value > 0.0 {
                MarkAnchor::Positive
            } else if value < 0.0 {
                MarkAnchor::Negative
            } else {
                match orientation {
                    Orientation::Vertical => MarkAnchor::Positive,
                    Orientation::Horizontal => MarkAnchor::Centered,
                }
            };
            Some(TextMark {
                position: i as f64,
                value,
                text: text.clone(),
                anchor,
                size,
            })
        })
        .collect()
}

/// Index of the first entry equal to `tag_id`.
pub fn finds_paramagnetic_tag<'a, I>(tag_data: I, tag_id: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let position = tag_data.into_iter().position(|t| t == tag_id);
    log::debug!("Tag bar index position: {:?}", position);
    position
}

/// Status colours of the bar templates.
#[must_use]
pub fn status_colors(measured: &str, missing: &str, unassigned: &str) -> BTreeMap<String, String> {
    [
        ("measured", measured),
        ("missing", missing),
        ("unassigned", unassigned),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_set_item_colors() {
        let mut colors = vec!["black".to_string(); 3];
        let conditions = ["measured", "missing", "other"];
        set_item_colors(
            &mut colors,
            conditions,
            &status_colors("black", "red", "grey"),
        );
        assert_eq!(colors, vec!["black", "red", "black"]);
    }

    #[test]
    fn test_text_marker_anchors() {
        let values = [0.2, -0.1, 0.0, f64::NAN, 0.3];
        let codes = ["P", "P", "P", "P", "A"];
        let marks = text_marker(&values, codes, &map(&[("P", "p")]), 4.0, Orientation::Vertical);

        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].anchor, MarkAnchor::Positive);
        assert_eq!(marks[1].anchor, MarkAnchor::Negative);
        assert_eq!(marks[2].anchor, MarkAnchor::Positive);
        assert_eq!(marks[3].value, 0.0);
        assert_eq!(marks[3].position, 3.0);

        let sideways =
            text_marker(&values, codes, &map(&[("P", "p")]), 4.0, Orientation::Horizontal);
        assert_eq!(sideways[2].anchor, MarkAnchor::Centered);
    }

    #[test]
    fn test_finds_paramagnetic_tag() {
        assert_eq!(finds_paramagnetic_tag(["", "", "*", "*"], "*"), Some(2));
        assert_eq!(finds_paramagnetic_tag(["*", ""], "*"), Some(0));
        assert_eq!(finds_paramagnetic_tag(["", ""], "*"), None);
    }
}
