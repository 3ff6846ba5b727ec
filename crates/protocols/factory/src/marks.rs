//! Protocol fee slider marks
//!
//! The factory reports which protocol fee encodings it accepts. Below 16%
//! only a curated subset is offered; everything above is shown as-is.

use std::collections::BTreeMap;

use crate::constants::marks::{ALLOWED_LOW_PROTOCOL_FEES, FALLBACK_MARKS, LOW_PROTOCOL_FEE_THRESHOLD};
use crate::constants::PROTOCOL_FEE_RATIO;
use crate::state::SliderMark;

/// Build the slider marks from the allowed protocol fee encodings.
pub fn protocol_fee_marks(possible: &[u64]) -> Vec<SliderMark> {
    let ratio = PROTOCOL_FEE_RATIO as u64;

    if possible.is_empty() {
        return FALLBACK_MARKS
            .iter()
            .map(|&encoded| SliderMark {
                percent: (encoded / ratio) as f64,
                encoded,
                label: (encoded / ratio).to_string(),
            })
            .collect();
    }

    let mut marks: BTreeMap<u64, String> = BTreeMap::new();
    marks.insert(0, "0%".to_string());

    for &encoded in possible {
        if encoded < LOW_PROTOCOL_FEE_THRESHOLD && !ALLOWED_LOW_PROTOCOL_FEES.contains(&encoded) {
            continue;
        }
        let label = if encoded == 0 || encoded == 100 * ratio {
            format!("{}%", encoded / ratio)
        } else {
            String::new()
        };
        marks.insert(encoded, label);
    }

    marks
        .into_iter()
        .map(|(encoded, label)| SliderMark {
            percent: encoded as f64 / ratio as f64,
            encoded,
            label,
        })
        .collect()
}

/// The mark matching `percent` exactly, if any.
pub fn snap_to_mark(marks: &[SliderMark], percent: f64) -> Option<&SliderMark> {
    let encoded = crate::calculator::to_contract(percent, PROTOCOL_FEE_RATIO).ok()?;
    marks.iter().find(|mark| mark.encoded == encoded)
}
