//! DOM listeners feeding the orbit camera and the interaction state.

use crate::dom;
use flower_core::{InteractionState, OrbitCamera};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
}

pub fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::listen(window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

/// Mouse moves anywhere in the window update the pointer in NDC.
pub fn wire_mouse(window: &web::Window, interaction: Rc<RefCell<InteractionState>>) {
    dom::listen(window, "mousemove", move |ev: web::MouseEvent| {
        let (w, h) = dom::viewport_size();
        interaction.borrow_mut().on_mouse_move(
            Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            Vec2::new(w, h),
        );
    });
}

pub fn wire_wheel(
    canvas: &web::HtmlCanvasElement,
    interaction: Rc<RefCell<InteractionState>>,
    camera: Rc<RefCell<OrbitCamera>>,
) {
    dom::listen(canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dy = ev.delta_y() as f32;
        interaction.borrow_mut().on_wheel(dy);
        camera.borrow_mut().zoom_by_wheel(dy);
    });
}

pub fn wire_touch(canvas: &web::HtmlCanvasElement, interaction: Rc<RefCell<InteractionState>>) {
    {
        let interaction = interaction.clone();
        dom::listen(canvas, "touchstart", move |ev: web::TouchEvent| {
            if let Some(t) = ev.target_touches().get(0) {
                interaction
                    .borrow_mut()
                    .on_touch_start(Vec2::new(t.page_x() as f32, t.page_y() as f32));
            }
        });
    }
    {
        let interaction = interaction.clone();
        dom::listen(canvas, "touchmove", move |ev: web::TouchEvent| {
            if let Some(t) = ev.target_touches().get(0) {
                interaction.borrow_mut().on_touch_move(
                    Vec2::new(t.page_x() as f32, t.page_y() as f32),
                    Vec2::new(t.client_x() as f32, t.client_y() as f32),
                );
            }
        });
    }
    dom::listen(canvas, "touchend", move |_: web::TouchEvent| {
        interaction.borrow_mut().on_touch_end();
    });
}

/// Pointer drag on the canvas orbits the camera.
pub fn wire_orbit_drag(canvas: &web::HtmlCanvasElement, camera: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    {
        let drag = drag.clone();
        let canvas_capture = canvas.clone();
        dom::listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let _ = canvas_capture.set_pointer_capture(ev.pointer_id());
            *drag.borrow_mut() = DragState {
                active: true,
                last: Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            };
        });
    }
    {
        let drag = drag.clone();
        let canvas_move = canvas.clone();
        dom::listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.active {
                return;
            }
            let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let delta = p - d.last;
            d.last = p;
            let height = canvas_move.get_bounding_client_rect().height() as f32;
            camera.borrow_mut().rotate_by_drag(delta.x, delta.y, height);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        dom::listen(canvas, name, move |_: web::PointerEvent| {
            drag.borrow_mut().active = false;
        });
    }
}
