//! Decoding of `[1, 4 + nc, anchors]` predictions into labelled detections.
//!
//! Planes 0..4 hold `cx, cy, w, h` in letterboxed canvas pixels, planes `4..4 + nc` hold
//! the raw per-class scores. Each plane is `anchors` long.

use crate::common::{Candidate, ClassTable, DetectError, Detection, LayoutBox, LetterboxMapping, NDL_DOCL};
use crate::data::Tensor;
use crate::detection_runners::nms::nms;

/// Decodes `output` with the built-in class table.
pub fn decode(
    output: &Tensor,
    mapping: &LetterboxMapping,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<Detection>, DetectError> {
    decode_with_table(output, mapping, conf_threshold, iou_threshold, &NDL_DOCL)
}

/// Decodes, suppresses and labels. Unknown class ids get a fallback label and colour.
pub fn decode_with_table(
    output: &Tensor,
    mapping: &LetterboxMapping,
    conf_threshold: f32,
    iou_threshold: f32,
    table: &ClassTable,
) -> Result<Vec<Detection>, DetectError> {
    let candidates = decode_candidates(output, mapping, conf_threshold)?;
    let kept = nms(&candidates, iou_threshold);
    Ok(kept.into_iter().map(|c| c.labelled(table)).collect())
}

/// Every anchor whose best class score reaches `conf_threshold`, mapped back to
/// original-image coordinates. No suppression is applied.
pub fn decode_candidates(
    output: &Tensor,
    mapping: &LetterboxMapping,
    conf_threshold: f32,
) -> Result<Vec<Candidate>, DetectError> {
    let preds = output.prediction_planes()?;
    let (channels, anchors) = preds.dim();
    let nc = channels - 4;

    let mut candidates = Vec::new();
    for i in 0..anchors {
        // strict `>` so the lowest class id wins ties
        let mut max_score = f32::NEG_INFINITY;
        let mut class_id = 0;
        for c in 0..nc {
            let score = preds[[4 + c, i]];
            if score > max_score {
                max_score = score;
                class_id = c;
            }
        }

        if max_score < conf_threshold {
            continue;
        }

        let (cx, cy, w, h) = (preds[[0, i]], preds[[1, i]], preds[[2, i]], preds[[3, i]]);
        let bbox = mapping.box_to_original(&LayoutBox::from_cxcy_wh(cx, cy, w, h));
        candidates.push(Candidate::new(bbox, max_score, class_id));
    }

    log::debug!("{} of {} anchors above confidence {}", candidates.len(), anchors, conf_threshold);
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a `[1, 4 + nc, anchors]` tensor from per-anchor rows.
    fn output(nc: usize, rows: &[[f32; 4]], scores: &[Vec<f32>]) -> Tensor {
        let anchors = rows.len();
        let mut data = vec![0.0; (4 + nc) * anchors];
        for (i, row) in rows.iter().enumerate() {
            for (p, v) in row.iter().enumerate() {
                data[p * anchors + i] = *v;
            }
            for (c, v) in scores[i].iter().enumerate() {
                data[(4 + c) * anchors + i] = *v;
            }
        }
        Tensor::from_shape_vec(&[1, 4 + nc, anchors], data).unwrap()
    }

    fn wide_mapping() -> LetterboxMapping {
        LetterboxMapping { scale: 0.5, pad_x: 0., pad_y: 160., original_width: 1280, original_height: 640 }
    }

    #[test]
    fn decodes_wide_image_anchor() {
        let out = output(5, &[[320., 320., 100., 50.]], &[vec![0.1, 0.2, 0.9, 0.3, 0.0]]);
        let c = decode_candidates(&out, &wide_mapping(), 0.5).unwrap();
        assert_eq!(c, vec![Candidate::new(LayoutBox::new(540., 270., 740., 370.), 0.9, 2)]);
    }

    #[test]
    fn ties_pick_lowest_class() {
        let out = output(3, &[[10., 10., 4., 4.]], &[vec![0.2, 0.7, 0.7]]);
        let c = decode_candidates(&out, &wide_mapping(), 0.5).unwrap();
        assert_eq!(c[0].class_id, 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let out = output(2, &[[10., 10., 4., 4.], [20., 20., 4., 4.]], &[vec![0.5, 0.0], vec![0.49, 0.0]]);
        let c = decode_candidates(&out, &wide_mapping(), 0.5).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].confidence, 0.5);
    }

    #[test]
    fn impossible_threshold_yields_nothing() {
        let out = output(2, &[[10., 10., 4., 4.]], &[vec![1.0, 0.3]]);
        assert!(decode(&out, &wide_mapping(), 1.1, 0.45).unwrap().is_empty());
    }

    #[test]
    fn zero_threshold_keeps_all_anchors() {
        let rows = [[10., 10., 4., 4.], [100., 100., 4., 4.], [200., 200., 4., 4.]];
        let scores = [vec![0.0, 0.0], vec![0.01, 0.0], vec![0.0, 0.02]];
        let c = decode_candidates(&output(2, &rows, &scores), &wide_mapping(), 0.0).unwrap();
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn labels_come_from_table() {
        let out = output(6, &[[10., 170., 4., 4.], [300., 300., 4., 4.]], &[
            vec![0.0, 0.0, 0.0, 0.8, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.9],
        ]);
        let d = decode(&out, &wide_mapping(), 0.5, 0.45).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!((d[0].label.as_str(), d[0].color.as_str()), ("図版", "#f39c12"));
        // class 5 is outside the 5-entry table
        assert_eq!((d[1].label.as_str(), d[1].color.as_str()), ("5", "#ffffff"));
    }

    #[test]
    fn duplicates_are_suppressed() {
        let out = output(1, &[[100., 200., 40., 40.], [101., 200., 40., 40.]], &[vec![0.8], vec![0.9]]);
        let d = decode(&out, &wide_mapping(), 0.5, 0.45).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].confidence, 0.9);
    }

    #[test]
    fn shape_mismatch() {
        let t = Tensor::from_shape_vec(&[1, 4, 10], vec![0.; 40]).unwrap();
        assert!(matches!(decode(&t, &wide_mapping(), 0.5, 0.45), Err(DetectError::ShapeMismatch(_))));
        let t = Tensor::from_shape_vec(&[1, 9, 0], vec![]).unwrap();
        assert!(matches!(decode(&t, &wide_mapping(), 0.5, 0.45), Err(DetectError::ShapeMismatch(_))));
    }
}
