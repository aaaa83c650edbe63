use std::cmp::Ordering;

use crate::common::{Candidate, Detection, LayoutBox};

pub trait Nms {
    fn bbox(&self) -> &LayoutBox;
    fn confidence(&self) -> f32;
    fn class_id(&self) -> usize;

    /// Computes the intersection over union (IoU) between this box and another.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox().iou(other.bbox())
    }
}

impl Nms for Candidate {
    fn bbox(&self) -> &LayoutBox {
        &self.bbox
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }

    fn class_id(&self) -> usize {
        self.class_id
    }
}

impl Nms for Detection {
    fn bbox(&self) -> &LayoutBox {
        &self.bbox
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }

    fn class_id(&self) -> usize {
        self.class_id
    }
}

/// Greedy per-class non-maximum suppression.
///
/// Classes are visited in order of first appearance in `boxes` and their survivors are
/// emitted as one block each; the output is not re-sorted globally. Within a class, boxes
/// are visited by descending confidence (stable, so exact ties keep input order) and a box
/// survives only if its IoU with every already kept box of that class is strictly below
/// `iou_threshold`.
pub fn nms<T: Nms + Clone>(boxes: &[T], iou_threshold: f32) -> Vec<T> {
    let mut class_order: Vec<usize> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, b) in boxes.iter().enumerate() {
        match class_order.iter().position(|&c| c == b.class_id()) {
            Some(g) => groups[g].push(i),
            None => {
                class_order.push(b.class_id());
                groups.push(vec![i]);
            }
        }
    }

    let mut kept = Vec::with_capacity(boxes.len());
    for mut group in groups {
        group.sort_by(|&a, &b| by_confidence_desc(&boxes[a], &boxes[b]));

        let mut suppressed = vec![false; group.len()];
        for i in 0..group.len() {
            if suppressed[i] {
                continue;
            }
            let best = &boxes[group[i]];
            kept.push(best.clone());
            for j in i + 1..group.len() {
                // NaN overlaps are dropped too, hence not `>=`
                if !suppressed[j] && !(best.iou(&boxes[group[j]]) < iou_threshold) {
                    suppressed[j] = true;
                }
            }
        }
    }

    log::debug!("NMS kept {} of {} boxes", kept.len(), boxes.len());
    kept
}

fn by_confidence_desc<T: Nms>(a: &T, b: &T) -> Ordering {
    b.confidence().total_cmp(&a.confidence())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(x1: f32, y1: f32, x2: f32, y2: f32, conf: f32, class_id: usize) -> Candidate {
        Candidate::new(LayoutBox::new(x1, y1, x2, y2), conf, class_id)
    }

    #[test]
    fn empty_input() {
        assert!(nms::<Candidate>(&[], 0.45).is_empty());
    }

    #[test]
    fn overlapping_same_class_threshold() {
        // IoU = 75 / 125 = 0.6
        let a = cand(0., 0., 10., 10., 0.9, 0);
        let b = cand(2.5, 0., 12.5, 10., 0.8, 0);
        assert!((a.iou(&b) - 0.6).abs() < 1e-6);

        let kept = nms(&[b, a], 0.45);
        assert_eq!(kept, vec![a]);

        let kept = nms(&[b, a], 0.7);
        assert_eq!(kept, vec![a, b]);
    }

    #[test]
    fn iou_equal_to_threshold_is_suppressed() {
        let a = cand(0., 0., 10., 10., 0.9, 0);
        let b = cand(0., 0., 10., 5., 0.8, 0);
        assert_eq!(nms(&[a, b], 0.5), vec![a]);
    }

    #[test]
    fn classes_never_suppress_each_other() {
        let a = cand(0., 0., 10., 10., 0.9, 0);
        let b = cand(0., 0., 10., 10., 0.8, 1);
        assert_eq!(nms(&[a, b], 0.1), vec![a, b]);
    }

    #[test]
    fn output_is_grouped_by_first_seen_class() {
        let c1_low = cand(100., 100., 110., 110., 0.3, 1);
        let c0 = cand(0., 0., 10., 10., 0.5, 0);
        let c1_high = cand(200., 200., 210., 210., 0.99, 1);
        let kept = nms(&[c1_low, c0, c1_high], 0.45);
        assert_eq!(kept, vec![c1_high, c1_low, c0]);
    }

    #[test]
    fn chain_suppression_is_greedy() {
        // a suppresses b, c only overlaps b, so c stays
        let a = cand(0., 0., 10., 10., 0.9, 0);
        let b = cand(4., 0., 14., 10., 0.8, 0);
        let c = cand(9., 0., 19., 10., 0.7, 0);
        assert!(a.iou(&b) >= 0.4);
        assert!(a.iou(&c) < 0.4);
        assert_eq!(nms(&[c, b, a], 0.4), vec![a, c]);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = cand(0., 0., 10., 10., 0.5, 0);
        let b = cand(1., 0., 11., 10., 0.5, 0);
        assert_eq!(nms(&[a, b], 0.45), vec![a]);
        assert_eq!(nms(&[b, a], 0.45), vec![b]);
    }

    #[test]
    fn works_on_detections() {
        let table = crate::common::NDL_DOCL;
        let a = cand(0., 0., 10., 10., 0.9, 3).labelled(&table);
        let b = cand(0., 0., 10., 10., 0.6, 3).labelled(&table);
        let kept = nms(&[b, a.clone()], 0.45);
        assert_eq!(kept, vec![a]);
    }
}
