//! Pointer-event routing for the overlay.
//!
//! The router sees every pointer event ahead of normal dispatch and decides
//! whether it belongs to a move or resize of the overlay. Anything it does
//! not claim is left untouched for the widget or window underneath.

use serde::{Deserialize, Serialize};

use crate::controller::OverlayController;
use crate::edges::{apply_resize, cursor_for, hit_test};
use crate::event::{Button, Disposition, PointerEvent, PointerKind};
use crate::gesture::DragState;
use crate::host::{ContentHost, NativeOutcome, OverlayHost};
use crate::rect::Point;

/// Tuning for the pointer router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Width in pixels of the resize zone along each edge.
    pub edge_margin: i32,
    /// Try the platform's own move/resize loop before manual tracking.
    pub native_gestures: bool,
    /// Treat a move without the primary button as a lost release and end
    /// the gesture.
    pub recover_stale_gestures: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            edge_margin: 12,
            native_gestures: true,
            recover_stale_gestures: false,
        }
    }
}

/// Drives the drag/resize state machine from raw pointer events.
#[derive(Debug, Clone, Default)]
pub struct PointerRouter {
    options: RouterOptions,
}

impl PointerRouter {
    pub fn new(options: RouterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Routes one event, returning whether it was consumed.
    ///
    /// Events are expected strictly in arrival order; the router never
    /// reorders or batches them.
    pub fn route<H: OverlayHost, C: ContentHost>(
        &self,
        ctl: &mut OverlayController<H, C>,
        event: &PointerEvent,
    ) -> Disposition {
        if !self.should_intercept(ctl, event.position) {
            return Disposition::PassThrough;
        }

        match event.kind {
            PointerKind::Press(Button::Primary) => self.on_primary_press(ctl, event.position),
            PointerKind::Press(Button::Secondary) => {
                ctl.open_context_menu(event.position);
                Disposition::Consumed
            }
            PointerKind::Move => self.on_move(ctl, event),
            PointerKind::Release(Button::Primary) => {
                if ctl.clear_gesture() {
                    Disposition::Consumed
                } else {
                    Disposition::PassThrough
                }
            }
            PointerKind::Press(_) | PointerKind::Release(_) => Disposition::PassThrough,
        }
    }

    /// Evaluates the pass-through guards in order.
    fn should_intercept<H: OverlayHost, C: ContentHost>(
        &self,
        ctl: &OverlayController<H, C>,
        position: Point,
    ) -> bool {
        if ctl.is_click_through() {
            return false;
        }
        let host = ctl.host();
        if !host.is_visible() || host.popup_active() {
            return false;
        }
        if !ctl.rect().contains(position) {
            return false;
        }
        // Another window genuinely on top at this point owns the event.
        match host.root_surface_at(position) {
            Some(surface) => surface == ctl.surface(),
            None => true,
        }
    }

    fn on_primary_press<H: OverlayHost, C: ContentHost>(
        &self,
        ctl: &mut OverlayController<H, C>,
        position: Point,
    ) -> Disposition {
        let rect = ctl.rect();
        let edges = hit_test(&rect, position, self.options.edge_margin);

        let outcome = if self.options.native_gestures {
            ctl.try_native(edges)
        } else {
            NativeOutcome::Unsupported
        };

        match outcome {
            NativeOutcome::Completed => ctl.sync_geometry(),
            NativeOutcome::Failed | NativeOutcome::Unsupported => {
                crate::log_debug!("manual gesture at {position:?} edges {edges:?} ({outcome:?})");
                ctl.begin_gesture(DragState::begin(position, rect, edges));
            }
        }
        Disposition::Consumed
    }

    fn on_move<H: OverlayHost, C: ContentHost>(
        &self,
        ctl: &mut OverlayController<H, C>,
        event: &PointerEvent,
    ) -> Disposition {
        if !event.primary_held {
            if self.options.recover_stale_gestures && ctl.clear_gesture() {
                crate::log_info!("primary button no longer held; gesture ended");
            }
            let edges = hit_test(&ctl.rect(), event.position, self.options.edge_margin);
            ctl.show_cursor(cursor_for(edges));
            return Disposition::PassThrough;
        }

        match ctl.gesture() {
            DragState::Resizing {
                start_pointer,
                start_rect,
                edges,
            } => {
                let delta = event.position.delta_from(start_pointer);
                let rect = apply_resize(&start_rect, edges, delta, ctl.min_size());
                ctl.set_geometry(rect);
                Disposition::Consumed
            }
            DragState::Dragging {
                start_pointer,
                start_rect,
            } => {
                let delta = event.position.delta_from(start_pointer);
                ctl.set_geometry(start_rect.translated(delta));
                Disposition::Consumed
            }
            DragState::Idle => Disposition::PassThrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{CursorKind, Edge, EdgeSet};
    use crate::host::{SurfaceId, WindowStyle};
    use crate::rect::Rect;
    use crate::testing::{FakeHost, OWN_SURFACE, controller, controller_with};

    fn manual_router() -> PointerRouter {
        PointerRouter::new(RouterOptions::default())
    }

    #[test]
    fn press_in_interior_starts_manual_drag_when_native_unsupported() {
        // Arrange
        let router = manual_router();
        let mut ctl = controller();

        // Act
        let d = router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        // Assert
        assert_eq!(d, Disposition::Consumed);
        assert_eq!(
            ctl.gesture(),
            DragState::Dragging {
                start_pointer: Point::new(400, 400),
                start_rect: Rect::new(100, 100, 900, 700),
            }
        );
        assert_eq!(ctl.host().native_moves.borrow().len(), 1);
    }

    #[test]
    fn press_on_edge_starts_manual_resize() {
        let router = manual_router();
        let mut ctl = controller();

        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 104, 400));

        assert!(matches!(
            ctl.gesture(),
            DragState::Resizing { edges, .. } if edges == EdgeSet::of(&[Edge::Left])
        ));
        assert_eq!(
            ctl.host().native_resizes.borrow().as_slice(),
            &[EdgeSet::of(&[Edge::Left])]
        );
    }

    #[test]
    fn completed_native_gesture_leaves_router_idle() {
        // Arrange
        let host = FakeHost::default();
        *host.native_outcome.borrow_mut() = NativeOutcome::Completed;
        *host.rect_after_native.borrow_mut() = Some(Rect::new(150, 160, 950, 760));
        let mut ctl = controller_with(host);

        // Act
        let d = manual_router().route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        // Assert
        assert_eq!(d, Disposition::Consumed);
        assert!(ctl.gesture().is_idle());
        assert_eq!(ctl.rect(), Rect::new(150, 160, 950, 760));
    }

    #[test]
    fn failed_native_gesture_falls_back() {
        let host = FakeHost::default();
        *host.native_outcome.borrow_mut() = NativeOutcome::Failed;
        let mut ctl = controller_with(host);

        manual_router().route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        assert!(matches!(ctl.gesture(), DragState::Dragging { .. }));
    }

    #[test]
    fn native_gestures_can_be_disabled() {
        let host = FakeHost::default();
        *host.native_outcome.borrow_mut() = NativeOutcome::Completed;
        let mut ctl = controller_with(host);
        let router = PointerRouter::new(RouterOptions {
            native_gestures: false,
            ..Default::default()
        });

        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        assert!(ctl.host().native_moves.borrow().is_empty());
        assert!(matches!(ctl.gesture(), DragState::Dragging { .. }));
    }

    #[test]
    fn drag_ends_at_exact_offset_without_drift() {
        // Arrange
        let router = manual_router();
        let mut ctl = controller();
        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        // Act: many small moves, each re-entering the moved window.
        let mut x = 400;
        let mut y = 400;
        for i in 0..200 {
            x += if i % 3 == 0 { 2 } else { -1 };
            y += if i % 2 == 0 { 1 } else { 0 };
            let d = router.route(&mut ctl, &PointerEvent::moved(x, y, true));
            assert_eq!(d, Disposition::Consumed);
        }
        router.route(&mut ctl, &PointerEvent::release(Button::Primary, x, y));

        // Assert
        let expected = Rect::new(100, 100, 900, 700).translated(Point::new(x - 400, y - 400));
        assert_eq!(ctl.rect(), expected);
        assert_eq!(ctl.host().placed.borrow().last(), Some(&expected));
        assert!(ctl.gesture().is_idle());
    }

    #[test]
    fn resize_from_corner_clamps_to_minimum() {
        // Arrange
        let router = manual_router();
        let host = FakeHost::default();
        let mut ctl = crate::testing::controller_at(host, Rect::new(0, 0, 300, 300));
        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 295, 295));

        // Act
        router.route(&mut ctl, &PointerEvent::moved(195, 195, true));

        // Assert
        assert_eq!(ctl.rect(), Rect::new(0, 0, 260, 200));
    }

    #[test]
    fn release_without_gesture_passes_through() {
        let router = manual_router();
        let mut ctl = controller();

        let first = router.route(&mut ctl, &PointerEvent::release(Button::Primary, 400, 400));
        let second = router.route(&mut ctl, &PointerEvent::release(Button::Primary, 400, 400));

        assert_eq!(first, Disposition::PassThrough);
        assert_eq!(second, Disposition::PassThrough);
    }

    #[test]
    fn hover_updates_cursor_without_consuming() {
        let router = manual_router();
        let mut ctl = controller();

        let d = router.route(&mut ctl, &PointerEvent::moved(895, 695, false));

        assert_eq!(d, Disposition::PassThrough);
        assert_eq!(*ctl.host().cursor.borrow(), CursorKind::ResizeNwSe);
    }

    #[test]
    fn held_move_without_gesture_passes_through() {
        let router = manual_router();
        let mut ctl = controller();

        let d = router.route(&mut ctl, &PointerEvent::moved(400, 400, true));

        assert_eq!(d, Disposition::PassThrough);
        assert!(ctl.host().placed.borrow().is_empty());
    }

    #[test]
    fn secondary_press_opens_context_menu() {
        let router = manual_router();
        let mut ctl = controller();

        let d = router.route(&mut ctl, &PointerEvent::press(Button::Secondary, 300, 300));

        assert_eq!(d, Disposition::Consumed);
        assert_eq!(
            ctl.host().menus_shown.borrow().as_slice(),
            &[Point::new(300, 300)]
        );
    }

    #[test]
    fn middle_button_passes_through() {
        let router = manual_router();
        let mut ctl = controller();

        let d = router.route(&mut ctl, &PointerEvent::press(Button::Middle, 300, 300));

        assert_eq!(d, Disposition::PassThrough);
    }

    #[test]
    fn guards_pass_events_through() {
        let router = manual_router();
        let press = PointerEvent::press(Button::Primary, 400, 400);

        let hidden = FakeHost::default();
        *hidden.visible.borrow_mut() = false;
        let mut ctl = controller_with(hidden);
        assert_eq!(router.route(&mut ctl, &press), Disposition::PassThrough);

        let menu_open = FakeHost::default();
        *menu_open.popup.borrow_mut() = true;
        let mut ctl = controller_with(menu_open);
        assert_eq!(router.route(&mut ctl, &press), Disposition::PassThrough);

        let mut ctl = controller();
        let outside = PointerEvent::press(Button::Primary, 50, 400);
        assert_eq!(router.route(&mut ctl, &outside), Disposition::PassThrough);

        let covered = FakeHost::default();
        *covered.surface_at.borrow_mut() = Some(SurfaceId(0xBEEF));
        let mut ctl = controller_with(covered);
        assert_eq!(router.route(&mut ctl, &press), Disposition::PassThrough);
        assert!(ctl.gesture().is_idle());

        let own = FakeHost::default();
        *own.surface_at.borrow_mut() = Some(OWN_SURFACE);
        let mut ctl = controller_with(own);
        assert_eq!(router.route(&mut ctl, &press), Disposition::Consumed);
        assert!(!ctl.gesture().is_idle());
    }

    #[test]
    fn click_through_blocks_every_gesture() {
        // Arrange
        let router = manual_router();
        let mut ctl = controller();
        ctl.toggle_click_through();
        let events = [
            PointerEvent::press(Button::Primary, 400, 400),
            PointerEvent::moved(420, 420, true),
            PointerEvent::press(Button::Primary, 104, 400),
            PointerEvent::moved(50, 50, true),
            PointerEvent::press(Button::Secondary, 400, 400),
            PointerEvent::release(Button::Primary, 400, 400),
            PointerEvent::moved(104, 400, false),
        ];

        // Act / Assert
        for event in &events {
            assert_eq!(router.route(&mut ctl, event), Disposition::PassThrough);
            assert!(ctl.gesture().is_idle());
        }
        assert!(ctl.host().menus_shown.borrow().is_empty());
        assert!(ctl.host().placed.borrow().is_empty());
    }

    #[test]
    fn click_through_cancels_gesture_in_flight() {
        let router = manual_router();
        let mut ctl = controller();
        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));
        assert!(!ctl.gesture().is_idle());

        ctl.toggle_click_through();
        ctl.toggle_click_through();

        assert!(ctl.gesture().is_idle());
        let d = router.route(&mut ctl, &PointerEvent::moved(450, 450, true));
        assert_eq!(d, Disposition::PassThrough);
        assert_eq!(
            *ctl.host().style.borrow(),
            WindowStyle {
                layered: true,
                input_transparent: false,
            }
        );
    }

    #[test]
    fn lost_release_keeps_gesture_by_default() {
        let router = manual_router();
        let mut ctl = controller();
        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        router.route(&mut ctl, &PointerEvent::moved(410, 410, false));

        assert!(matches!(ctl.gesture(), DragState::Dragging { .. }));
    }

    #[test]
    fn stale_gesture_recovery_clears_on_buttonless_move() {
        let router = PointerRouter::new(RouterOptions {
            recover_stale_gestures: true,
            ..Default::default()
        });
        let mut ctl = controller();
        router.route(&mut ctl, &PointerEvent::press(Button::Primary, 400, 400));

        let d = router.route(&mut ctl, &PointerEvent::moved(410, 410, false));

        assert_eq!(d, Disposition::PassThrough);
        assert!(ctl.gesture().is_idle());
    }
}
