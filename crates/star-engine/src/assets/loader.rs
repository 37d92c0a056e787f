//! Collects catalog documents as they arrive and hands finished collections
//! to the renderer.
//!
//! Documents can land in any order. Constellations are released once the
//! line document and the names document have both settled (the names
//! document may fail; labels then fall back to vertex centroids). Stars are
//! released as soon as the star catalog parses. Every collection is released
//! exactly once.

use std::collections::HashMap;

use crate::api::config::{SkyConfig, StarColorSource};
use crate::components::{ConstellationColors, ConstellationLine, Star};
use crate::core::rng::Rng;

use super::catalog::{parse_constellation_lines, parse_label_anchors, parse_stars, LabelAnchor};
use super::error::{CatalogDocument, CatalogError};

/// Collections ready to be installed on the next frame.
#[derive(Debug, Default)]
pub struct CatalogUpdate {
    pub stars: Option<Vec<Star>>,
    pub constellations: Option<Vec<ConstellationLine>>,
    pub errors: Vec<(CatalogDocument, CatalogError)>,
}

impl CatalogUpdate {
    pub fn is_empty(&self) -> bool {
        self.stars.is_none() && self.constellations.is_none() && self.errors.is_empty()
    }
}

enum Slot<T> {
    Pending,
    Ready(T),
    Failed,
    Released,
}

impl<T> Slot<T> {
    fn is_settled(&self) -> bool {
        !matches!(self, Slot::Pending)
    }
}

pub struct CatalogLoader {
    rng: Rng,
    star_color: StarColorSource,
    lines: Slot<Vec<ConstellationLine>>,
    anchors: Slot<HashMap<String, LabelAnchor>>,
    stars: Slot<Vec<Star>>,
    errors: Vec<(CatalogDocument, CatalogError)>,
}

impl CatalogLoader {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            rng: Rng::new(config.seed),
            star_color: config.star_color,
            lines: Slot::Pending,
            anchors: Slot::Pending,
            stars: Slot::Pending,
            errors: Vec::new(),
        }
    }

    /// Record the outcome of fetching one document. Parse failures are
    /// folded into the same error path as network failures.
    pub fn deliver(&mut self, doc: CatalogDocument, body: Result<String, CatalogError>) {
        let outcome = match doc {
            CatalogDocument::Lines => body
                .and_then(|json| parse_constellation_lines(&json))
                .map(|lines| {
                    log::info!("{}: {} constellations", doc, lines.len());
                    self.lines = Slot::Ready(lines);
                }),
            CatalogDocument::Names => body
                .and_then(|json| parse_label_anchors(&json))
                .map(|anchors| {
                    log::info!("{}: {} label anchors", doc, anchors.len());
                    self.anchors = Slot::Ready(anchors);
                }),
            CatalogDocument::Stars => {
                let (rng, color) = (&mut self.rng, self.star_color);
                body.and_then(|json| parse_stars(&json, color, rng))
                    .map(|stars| {
                        log::info!("{}: {} stars", doc, stars.len());
                        self.stars = Slot::Ready(stars);
                    })
            }
        };

        if let Err(err) = outcome {
            match &err {
                CatalogError::Aborted => log::debug!("{}: {}", doc, err),
                _ => log::error!("{}: {}", doc, err),
            }
            match doc {
                CatalogDocument::Lines => self.lines = Slot::Failed,
                CatalogDocument::Names => {
                    log::warn!("labels will use vertex centroids");
                    self.anchors = Slot::Failed;
                }
                CatalogDocument::Stars => self.stars = Slot::Failed,
            }
            self.errors.push((doc, err));
        }
    }

    /// Everything that became ready since the last call.
    pub fn take_update(&mut self) -> CatalogUpdate {
        let mut update = CatalogUpdate {
            errors: std::mem::take(&mut self.errors),
            ..Default::default()
        };

        if let Slot::Ready(_) = self.stars {
            if let Slot::Ready(stars) = std::mem::replace(&mut self.stars, Slot::Released) {
                update.stars = Some(stars);
            }
        }

        if matches!(self.lines, Slot::Ready(_)) && self.anchors.is_settled() {
            if let Slot::Ready(mut lines) = std::mem::replace(&mut self.lines, Slot::Released) {
                let anchors = match std::mem::replace(&mut self.anchors, Slot::Released) {
                    Slot::Ready(anchors) => anchors,
                    _ => HashMap::new(),
                };
                attach_labels(&mut lines, anchors);
                update.constellations = Some(lines);
            }
        }

        update
    }

    /// True once every document has either been released or failed.
    pub fn is_finished(&self) -> bool {
        [self.lines.is_settled(), self.anchors.is_settled(), self.stars.is_settled()]
            .iter()
            .all(|s| *s)
            && !matches!(self.lines, Slot::Ready(_))
            && !matches!(self.stars, Slot::Ready(_))
    }
}

fn attach_labels(lines: &mut [ConstellationLine], mut anchors: HashMap<String, LabelAnchor>) {
    let mut missing = 0;
    for line in lines.iter_mut() {
        match anchors.remove(&line.id) {
            Some(anchor) => {
                line.label_anchor = Some(anchor.point);
                line.name = anchor.name;
            }
            None => missing += 1,
        }
    }
    if missing > 0 && !lines.is_empty() {
        log::warn!("{} constellations have no label anchor", missing);
    }
}

/// Tint each constellation after the brightest star under its vertices.
///
/// For every vertex, every star within `match_distance_sq` (squared chord
/// distance) is a color candidate; the lowest magnitude across the whole
/// figure wins. Only the nearest star within `ignition_distance_sq` of a
/// vertex is remembered for the hover ignition.
pub fn assign_constellation_colors(
    constellations: &mut [ConstellationLine],
    stars: &[Star],
    match_distance_sq: f32,
    ignition_distance_sq: f32,
) {
    for con in constellations.iter_mut() {
        let mut brightest: Option<&Star> = None;
        let mut ignited = Vec::new();
        for vertex in con.vertices() {
            let mut nearest: Option<(usize, f32)> = None;
            for (idx, star) in stars.iter().enumerate() {
                let d = vertex.distance_sq(&star.position);
                if d >= match_distance_sq {
                    continue;
                }
                if brightest.map_or(true, |b| star.magnitude < b.magnitude) {
                    brightest = Some(star);
                }
                if d < ignition_distance_sq && nearest.map_or(true, |(_, best)| d < best) {
                    nearest = Some((idx, d));
                }
            }
            if let Some((idx, _)) = nearest {
                if !ignited.contains(&idx) {
                    ignited.push(idx);
                }
            }
        }
        con.colors = brightest
            .map(|s| ConstellationColors::from_node(s.color))
            .unwrap_or(ConstellationColors::FALLBACK);
        con.ignited_stars = ignited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgb;
    use crate::components::SkyPoint;

    const LINES: &str = r#"{"features":[{"id":"Ori","geometry":{"coordinates":[[[-90,0],[-95,5]]]}}]}"#;
    const NAMES: &str = r#"{"features":[{"id":"Ori","geometry":{"coordinates":[-92,2]},"properties":{"name":"Orion"}}]}"#;
    const STARS: &str = r#"{"features":[{"geometry":{"coordinates":[-90,0]},"properties":{"mag":0.5,"bv":"1.8"}}]}"#;

    fn loader() -> CatalogLoader {
        CatalogLoader::new(&SkyConfig::default())
    }

    #[test]
    fn constellations_wait_for_names() {
        let mut l = loader();
        l.deliver(CatalogDocument::Lines, Ok(LINES.to_string()));
        assert!(l.take_update().constellations.is_none());
        l.deliver(CatalogDocument::Names, Ok(NAMES.to_string()));
        let cons = l.take_update().constellations.unwrap();
        assert_eq!(cons[0].name.as_deref(), Some("Orion"));
        assert!(cons[0].label_anchor.is_some());
        // Released only once
        assert!(l.take_update().constellations.is_none());
    }

    #[test]
    fn names_failure_only_drops_labels() {
        let mut l = loader();
        l.deliver(CatalogDocument::Names, Err(CatalogError::Status(500)));
        l.deliver(CatalogDocument::Lines, Ok(LINES.to_string()));
        let update = l.take_update();
        let cons = update.constellations.unwrap();
        assert_eq!(cons.len(), 1);
        assert!(cons[0].label_anchor.is_none());
        assert_eq!(update.errors.len(), 1);
        assert_eq!(update.errors[0].0, CatalogDocument::Names);
    }

    #[test]
    fn star_failure_leaves_constellations_intact() {
        let mut l = loader();
        l.deliver(CatalogDocument::Stars, Err(CatalogError::Network("offline".into())));
        l.deliver(CatalogDocument::Lines, Ok(LINES.to_string()));
        l.deliver(CatalogDocument::Names, Ok(NAMES.to_string()));
        let update = l.take_update();
        assert!(update.stars.is_none());
        assert_eq!(update.constellations.map(|c| c.len()), Some(1));
        assert!(matches!(update.errors[0].1, CatalogError::Network(_)));
        assert!(l.is_finished());
    }

    #[test]
    fn malformed_body_is_recorded_as_parse_error() {
        let mut l = loader();
        l.deliver(CatalogDocument::Stars, Ok("{oops".to_string()));
        let update = l.take_update();
        assert!(update.stars.is_none());
        assert!(matches!(update.errors[0].1, CatalogError::Parse(_)));
    }

    #[test]
    fn stars_released_independently() {
        let mut l = loader();
        l.deliver(CatalogDocument::Stars, Ok(STARS.to_string()));
        let update = l.take_update();
        assert_eq!(update.stars.map(|s| s.len()), Some(1));
        assert!(!l.is_finished());
    }

    #[test]
    fn colors_follow_brightest_nearby_star() {
        let v = SkyPoint::from_ra_dec(90.0, 0.0);
        let mut cons = vec![ConstellationLine::new("A", vec![vec![v]])];
        let dim = Star::new(v, 4.0, 0.0, Rgb::new(10, 10, 10));
        let bright = Star::new(SkyPoint::from_ra_dec(91.0, 0.5), 1.0, 0.0, Rgb::new(200, 100, 50));
        let far = Star::new(SkyPoint::from_ra_dec(270.0, 0.0), -1.0, 0.0, Rgb::new(1, 2, 3));
        assign_constellation_colors(&mut cons, &[dim, bright, far], 0.08, 1e-5);
        assert_eq!(cons[0].colors, ConstellationColors::from_node(Rgb::new(200, 100, 50)));
        // the bright star is a degree off the vertex: it tints but stays dark
        assert_eq!(cons[0].ignited_stars, vec![0]);
    }

    #[test]
    fn no_match_uses_fallback() {
        let mut cons = vec![ConstellationLine::new(
            "A",
            vec![vec![SkyPoint::from_ra_dec(0.0, 0.0)]],
        )];
        let far = Star::new(SkyPoint::from_ra_dec(180.0, 0.0), 0.0, 0.0, Rgb::WHITE);
        assign_constellation_colors(&mut cons, &[far], 0.08, 1e-5);
        assert_eq!(cons[0].colors, ConstellationColors::FALLBACK);
        assert!(cons[0].ignited_stars.is_empty());
    }

    #[test]
    fn only_coincident_stars_ignite_in_dense_sky() {
        // Evenly spread catalog on a golden spiral
        let n = 5000;
        let golden = std::f32::consts::PI * (3.0 - 5f32.sqrt());
        let mut stars: Vec<Star> = (0..n)
            .map(|i| {
                let z = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
                let dec = z.asin().to_degrees();
                let ra = (golden * i as f32).to_degrees().rem_euclid(360.0);
                Star::new(SkyPoint::from_ra_dec(ra, dec), 5.0, 0.0, Rgb::WHITE)
            })
            .collect();

        let vertices: Vec<SkyPoint> = [
            (88.8, 7.4),
            (81.3, 6.3),
            (83.0, -0.3),
            (84.1, -1.2),
            (85.2, -1.9),
            (78.6, -8.2),
            (86.9, -9.7),
        ]
        .iter()
        .map(|&(ra, dec)| SkyPoint::from_ra_dec(ra, dec))
        .collect();
        let first_real = stars.len();
        for v in &vertices {
            stars.push(Star::new(*v, 1.0, 0.0, Rgb::new(255, 200, 150)));
        }

        let mut cons = vec![ConstellationLine::new("Ori", vec![vertices])];
        assign_constellation_colors(&mut cons, &stars, 0.08, 1e-5);

        let expected: Vec<usize> = (first_real..first_real + 7).collect();
        assert_eq!(cons[0].ignited_stars, expected);
        assert_eq!(cons[0].colors, ConstellationColors::from_node(Rgb::new(255, 200, 150)));
    }
}
