//! Travel scene: the animated ship token on the map.
//!
//! Runs on its own frame clock, fully independent of the countdown. The
//! two share nothing but the immutable session record, so the token can
//! still be gliding for a sub-second moment after arrival has settled,
//! or snap a beat early. Either way the scene's own completion flag and
//! the store's travel flags converge within one countdown tick.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use hermes_logic::coords::MapCoordinate;
use hermes_logic::easing::Easing;
use hermes_logic::routes;

use super::session::TravelSession;

/// Eases the ship token between planets over a session's duration.
pub struct TravelScene {
    session: Option<Rc<TravelSession>>,
    /// Where the current tween started. Retargeting begins here, not at
    /// the session's origin planet.
    tween_origin: MapCoordinate,
    position: MapCoordinate,
    easing: Easing,
    travel_complete: bool,
}

impl TravelScene {
    pub fn new(position: MapCoordinate) -> Self {
        Self {
            session: None,
            tween_origin: position,
            position,
            easing: Easing::QuintInOut,
            travel_complete: false,
        }
    }

    /// Begin animating a session. A scene already mid-flight retargets:
    /// the new tween starts from the token's current position.
    pub fn begin(&mut self, session: Rc<TravelSession>) {
        self.tween_origin = self.position;
        self.travel_complete = false;
        log::debug!("scene tween begins toward {}", session.destination.name);
        self.session = Some(session);
    }

    /// Recompute the token position for the frame at `now`. At the end
    /// of the trip the position snaps to the destination exactly and the
    /// scene raises its completion flag.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let Some(session) = self.session.clone() else {
            return;
        };

        let t = routes::travel_progress(session.elapsed_ms(now), session.duration_ms);
        if t >= 1.0 {
            self.position = session.destination.coord;
            self.session = None;
            self.travel_complete = true;
            log::debug!("scene tween complete at {}", session.destination.name);
            return;
        }

        self.position = self
            .tween_origin
            .lerp(&session.destination.coord, self.easing.apply(t));
    }

    pub fn position(&self) -> MapCoordinate {
        self.position
    }

    /// True from the frame the token reached its destination until the
    /// next [`begin`](Self::begin). Scoped to this scene instance.
    pub fn is_travel_complete(&self) -> bool {
        self.travel_complete
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlaceRef;
    use chrono::TimeDelta;

    fn session_to(
        origin: MapCoordinate,
        dest: MapCoordinate,
        duration_ms: i64,
        departed: DateTime<Utc>,
    ) -> Rc<TravelSession> {
        TravelSession::new(origin, PlaceRef::new("Kepler Landing", dest), duration_ms, departed)
    }

    #[test]
    fn test_midpoint_lies_strictly_between() {
        let start = Utc::now();
        let origin = MapCoordinate::ZERO;
        let dest = MapCoordinate::new(100.0, 0.0, 0.0);

        let mut scene = TravelScene::new(origin);
        scene.begin(session_to(origin, dest, 4_000, start));

        scene.advance(start + TimeDelta::milliseconds(2_000));
        let mid = scene.position();
        assert!(mid.x > 0.0 && mid.x < 100.0, "got {:?}", mid);
        assert!(!scene.is_travel_complete());
    }

    #[test]
    fn test_completion_snaps_exactly() {
        let start = Utc::now();
        let origin = MapCoordinate::ZERO;
        let dest = MapCoordinate::new(100.0, -40.0, 12.5);

        let mut scene = TravelScene::new(origin);
        scene.begin(session_to(origin, dest, 4_000, start));

        scene.advance(start + TimeDelta::milliseconds(4_000));
        assert_eq!(scene.position(), dest);
        assert!(scene.is_travel_complete());
        assert!(!scene.is_animating());

        // further frames hold position
        scene.advance(start + TimeDelta::milliseconds(9_000));
        assert_eq!(scene.position(), dest);
    }

    #[test]
    fn test_eased_progress_lags_linear_early() {
        let start = Utc::now();
        let origin = MapCoordinate::ZERO;
        let dest = MapCoordinate::new(100.0, 0.0, 0.0);

        let mut scene = TravelScene::new(origin);
        scene.begin(session_to(origin, dest, 10_000, start));

        // 20% of the trip: a quintic in/out token has barely moved
        scene.advance(start + TimeDelta::milliseconds(2_000));
        assert!(scene.position().x < 20.0, "got {}", scene.position().x);
    }

    #[test]
    fn test_retarget_starts_from_current_position() {
        let start = Utc::now();
        let origin = MapCoordinate::ZERO;
        let first = MapCoordinate::new(100.0, 0.0, 0.0);

        let mut scene = TravelScene::new(origin);
        scene.begin(session_to(origin, first, 4_000, start));
        scene.advance(start + TimeDelta::milliseconds(2_000));
        let reached = scene.position();
        assert!(reached.x > 0.0);

        // retarget mid-flight toward a different planet
        let second = MapCoordinate::new(0.0, 80.0, 0.0);
        let redirect = start + TimeDelta::milliseconds(2_000);
        scene.begin(session_to(reached, second, 4_000, redirect));
        assert!(!scene.is_travel_complete());

        // the very first frame of the new tween still sits at the old spot
        scene.advance(redirect);
        assert_eq!(scene.position(), reached);

        scene.advance(redirect + TimeDelta::milliseconds(4_000));
        assert_eq!(scene.position(), second);
    }

    #[test]
    fn test_frames_between_departures_hold_still() {
        let start = Utc::now();
        let parked = MapCoordinate::new(5.0, 5.0, 5.0);

        let mut scene = TravelScene::new(parked);
        scene.advance(start);
        scene.advance(start + TimeDelta::seconds(10));
        assert_eq!(scene.position(), parked);
        assert!(!scene.is_travel_complete());
    }
}
