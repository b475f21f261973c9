use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::ring::{Bounds, Compositor, ProgressRing};
use crate::gui::theme;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub ring: Rc<RefCell<ProgressRing>>,
    pub compositor: Rc<RefCell<Compositor>>,
    pub progress_step: i64,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    SetProgress(i64),
    /// Direction (+1 or -1), scaled by the configured progress step.
    StepProgress(i64),
    SetArcStartLocation(i64),
    SetAnimate(bool),
    ToggleAnimate,
    SetLabel(bool),
    ToggleLabel,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SetProgress(v) => AppMsg::SetProgress(v),
            AppEvent::SetArcStartLocation(c) => AppMsg::SetArcStartLocation(c),
            AppEvent::SetAnimate(a) => AppMsg::SetAnimate(a),
            AppEvent::SetLabel(l) => AppMsg::SetLabel(l),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppMsg {
    pub fn from_key(key: gdk::Key) -> Option<Self> {
        let msg = match key {
            gdk::Key::Up | gdk::Key::Right => AppMsg::StepProgress(1),
            gdk::Key::Down | gdk::Key::Left => AppMsg::StepProgress(-1),
            gdk::Key::a => AppMsg::ToggleAnimate,
            gdk::Key::l => AppMsg::ToggleLabel,
            gdk::Key::_0 => AppMsg::SetArcStartLocation(0),
            gdk::Key::_1 => AppMsg::SetArcStartLocation(1),
            gdk::Key::_2 => AppMsg::SetArcStartLocation(2),
            gdk::Key::_3 => AppMsg::SetArcStartLocation(3),
            gdk::Key::Escape => AppMsg::Quit,
            _ => return None,
        };
        Some(msg)
    }
}

impl AppModel {
    fn apply_config(&mut self, config: &Config) {
        self.ring.borrow_mut().apply_config(&config.ring);
        self.compositor.borrow_mut().set_policy(config.ring.animation_policy);
        self.progress_step = config.window.progress_step;
    }

    fn install_draw_func(&self) {
        let ring = self.ring.clone();
        let compositor = self.compositor.clone();

        self.drawing_area.set_draw_func(move |_, cr, width, height| {
            let now = Instant::now();
            let bounds = Bounds::new(width as f64, height as f64);
            let mut compositor = compositor.borrow_mut();

            // re-render only on request or resize, otherwise repaint what is committed
            let requested = ring.borrow_mut().take_needs_display();
            if requested || compositor.bounds() != Some(bounds) {
                compositor.commit(ring.borrow().render(bounds), now);
            }

            if let Err(e) = compositor.draw(cr, now) {
                log::error!("Drawing error: {}", e);
            }
        });
    }

    /// Keeps frames coming while any layer is mid-reveal, plus one more so the final state is
    /// painted exactly.
    fn install_tick_callback(&self) {
        let compositor = self.compositor.clone();
        let was_animating = Cell::new(false);

        self.drawing_area.add_tick_callback(move |area, _clock| {
            let animating = compositor.borrow().is_animating(Instant::now());
            if animating || was_animating.get() {
                area.queue_draw();
            }
            was_animating.set(animating);
            glib::ControlFlow::Continue
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Progress Ring"),
            add_css_class: "progress-ring-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match AppMsg::from_key(key) {
                        Some(msg) => {
                            sender.input(msg);
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "progress-ring-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        root.set_default_size(config.window.width, config.window.height);

        let model = AppModel {
            ring: Rc::new(RefCell::new(ProgressRing::from_config(&config.ring))),
            compositor: Rc::new(RefCell::new(Compositor::new(config.ring.animation_policy))),
            progress_step: config.window.progress_step,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.install_draw_func();
        model.install_tick_callback();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::SetProgress(value) => self.ring.borrow_mut().set_progress(value),
            AppMsg::StepProgress(direction) => {
                let mut ring = self.ring.borrow_mut();
                let value = ring.progress() as i64 + direction * self.progress_step;
                ring.set_progress(value);
            }
            AppMsg::SetArcStartLocation(code) => {
                self.ring.borrow_mut().set_arc_start_location(code)
            }
            AppMsg::SetAnimate(animate) => self.ring.borrow_mut().set_animate_progress(animate),
            AppMsg::ToggleAnimate => {
                let mut ring = self.ring.borrow_mut();
                let animate = !ring.animate_progress();
                ring.set_animate_progress(animate);
            }
            AppMsg::SetLabel(show) => self.ring.borrow_mut().set_display_progress_textually(show),
            AppMsg::ToggleLabel => {
                let mut ring = self.ring.borrow_mut();
                let show = !ring.display_progress_textually();
                ring.set_display_progress_textually(show);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => {
                self.root.close();
                return;
            }
        }

        log::debug!(
            "Ring at {}% from {}",
            self.ring.borrow().progress(),
            self.ring.borrow().arc_start_location()
        );
        self.drawing_area.queue_draw();
    }
}
