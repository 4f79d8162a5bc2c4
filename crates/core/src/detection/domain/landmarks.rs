//! Landmark sets produced by the detection model, with the skeleton
//! topologies used to draw them.

/// Minimum per-keypoint confidence for a landmark to count as visible.
pub const VISIBLE_CONF_THRESH: f64 = 0.5;

/// COCO 17-keypoint body skeleton.
const BODY_CONNECTIONS: &[(usize, usize)] = &[
    (0, 1),
    (0, 2),
    (1, 3),
    (2, 4),
    (5, 6),
    (5, 7),
    (7, 9),
    (6, 8),
    (8, 10),
    (5, 11),
    (6, 12),
    (11, 12),
    (11, 13),
    (13, 15),
    (12, 14),
    (14, 16),
];

/// 21-keypoint hand skeleton: wrist, then four joints per digit.
const HAND_CONNECTIONS: &[(usize, usize)] = &[
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandmarkKind {
    Body,
    Hand,
}

impl LandmarkKind {
    pub fn keypoint_count(&self) -> usize {
        match self {
            LandmarkKind::Body => 17,
            LandmarkKind::Hand => 21,
        }
    }

    pub fn connections(&self) -> &'static [(usize, usize)] {
        match self {
            LandmarkKind::Body => BODY_CONNECTIONS,
            LandmarkKind::Hand => HAND_CONNECTIONS,
        }
    }
}

/// One keypoint in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

impl Landmark {
    pub fn is_visible(&self) -> bool {
        self.confidence >= VISIBLE_CONF_THRESH
    }
}

/// All keypoints of one detected body or hand, with the detection score.
#[derive(Clone, Debug)]
pub struct LandmarkSet {
    kind: LandmarkKind,
    points: Vec<Landmark>,
    score: f64,
}

impl LandmarkSet {
    pub fn new(kind: LandmarkKind, points: Vec<Landmark>, score: f64) -> Self {
        debug_assert_eq!(
            points.len(),
            kind.keypoint_count(),
            "point count must match the skeleton topology"
        );
        Self {
            kind,
            points,
            score,
        }
    }

    pub fn kind(&self) -> LandmarkKind {
        self.kind
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Connection endpoints where both keypoints are visible.
    pub fn visible_connections(&self) -> impl Iterator<Item = (Landmark, Landmark)> + '_ {
        self.kind.connections().iter().filter_map(move |&(a, b)| {
            let (pa, pb) = (self.points[a], self.points[b]);
            (pa.is_visible() && pb.is_visible()).then_some((pa, pb))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(x: f64, y: f64) -> Landmark {
        Landmark {
            x,
            y,
            confidence: 0.9,
        }
    }

    fn hidden() -> Landmark {
        Landmark {
            x: 0.0,
            y: 0.0,
            confidence: 0.1,
        }
    }

    #[test]
    fn test_keypoint_counts() {
        assert_eq!(LandmarkKind::Body.keypoint_count(), 17);
        assert_eq!(LandmarkKind::Hand.keypoint_count(), 21);
    }

    #[test]
    fn test_connections_index_within_topology() {
        for kind in [LandmarkKind::Body, LandmarkKind::Hand] {
            let n = kind.keypoint_count();
            for &(a, b) in kind.connections() {
                assert!(a < n && b < n, "{kind:?} connection ({a},{b}) out of range");
            }
        }
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(visible(1.0, 1.0).is_visible());
        assert!(!hidden().is_visible());
        let borderline = Landmark {
            x: 0.0,
            y: 0.0,
            confidence: VISIBLE_CONF_THRESH,
        };
        assert!(borderline.is_visible());
    }

    #[test]
    fn test_visible_connections_skip_hidden_endpoints() {
        let mut points: Vec<Landmark> = (0..17).map(|i| visible(i as f64, 0.0)).collect();
        points[1] = hidden(); // hides (0,1) and (1,3)
        let set = LandmarkSet::new(LandmarkKind::Body, points, 0.8);

        let connections: Vec<_> = set.visible_connections().collect();
        assert_eq!(connections.len(), BODY_CONNECTIONS.len() - 2);
    }

    #[test]
    #[should_panic(expected = "point count must match the skeleton topology")]
    fn test_wrong_point_count_panics_in_debug() {
        LandmarkSet::new(LandmarkKind::Hand, vec![visible(0.0, 0.0); 17], 0.5);
    }
}
