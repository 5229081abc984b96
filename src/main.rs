//! Onda entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use onda::motion::{self, Follower, HeaderState};
    use onda::narrator::{PhilosophyNarrator, QuoteDisplay};
    use onda::quotes::parse_quotes;
    use onda::render::{render_waves, CanvasSurface};
    use onda::sections::{active_section, SectionBounds, Viewport};
    use onda::settings::Settings;
    use onda::sim::WaveSimulator;
    use onda::surface_local;

    /// Quote source for the philosophy section, split on sentence punctuation
    const QUOTE_SOURCE: &str = "\
        Il silenzio parla più forte delle parole. \
        L'eleganza risiede nella semplicità. \
        La discrezione è la forma più alta di lusso. \
        Ogni momento è un'occasione per creare ricordi indelebili. \
        La bellezza nasce dall'armonia tra forma e funzione. \
        Il lusso autentico si manifesta nell'attenzione ai dettagli. \
        La perfezione si raggiunge quando non c'è più nulla da togliere.";

    /// Section ids wired to the dot navigation, in page order
    const NAV_SECTIONS: [&str; 5] = ["home", "philosophy", "servizi", "esperienza", "contatti"];

    /// DOM-backed quote display: text content plus transition classes the
    /// stylesheet animates.
    struct DomQuoteDisplay {
        quote_el: HtmlElement,
        indicator: HtmlElement,
    }

    impl QuoteDisplay for DomQuoteDisplay {
        fn show_quote(&mut self, text: &str) {
            self.quote_el.set_text_content(Some(text));
            let _ = self.quote_el.set_attribute("class", "quote");
        }

        fn begin_exit(&mut self) {
            let _ = self.quote_el.set_attribute("class", "quote quote-exit");
        }

        fn begin_entry(&mut self, text: &str) {
            self.quote_el.set_text_content(Some(text));
            let _ = self.quote_el.set_attribute("class", "quote quote-enter");
        }

        fn show_indicator(&mut self, pos: Vec2) {
            let style = self.indicator.style();
            let _ = style.set_property("left", &format!("{:.0}px", pos.x));
            let _ = style.set_property("top", &format!("{:.0}px", pos.y));
            let _ = style.set_property("opacity", "1");
        }

        fn hide_indicator(&mut self) {
            let _ = self.indicator.style().set_property("opacity", "0");
        }
    }

    /// The philosophy section binding: narrator plus its canvas
    struct Philosophy {
        narrator: PhilosophyNarrator<DomQuoteDisplay>,
        surface: CanvasSurface,
        section: HtmlElement,
        glow: bool,
    }

    impl Philosophy {
        fn pointer(&mut self, client: Vec2) {
            let rect = self.section.get_bounding_client_rect();
            let local = surface_local(client, Vec2::new(rect.left() as f32, rect.top() as f32));
            self.narrator.pointer_event(local);
        }

        fn frame(&mut self) {
            if self.narrator.active() {
                self.narrator.tick();
                render_waves(&mut self.surface, self.narrator.simulator().waves(), self.glow);
            }
        }

        fn resize(&mut self) {
            let rect = self.section.get_bounding_client_rect();
            let (w, h) = (rect.width() as f32, rect.height() as f32);
            self.surface.resize(w, h);
            self.narrator.resize(w, h);
        }
    }

    /// Trailing custom cursor: the dot pins to the pointer, ring and crown
    /// ease after it.
    struct CursorRig {
        dot: HtmlElement,
        ring: HtmlElement,
        crown: Option<HtmlElement>,
        ring_follow: Follower,
        crown_follow: Follower,
    }

    impl CursorRig {
        fn step(&mut self, mouse: Vec2) {
            set_translate(&self.dot, mouse);
            let ring_pos = self.ring_follow.step(mouse);
            set_translate(&self.ring, ring_pos);
            if let Some(ref crown) = self.crown {
                let crown_pos = self.crown_follow.step(mouse);
                set_translate(crown, crown_pos);
            }
        }
    }

    fn set_translate(el: &HtmlElement, pos: Vec2) {
        let _ = el.style().set_property(
            "transform",
            &format!("translate3d({:.1}px, {:.1}px, 0)", pos.x, pos.y),
        );
    }

    /// Dot navigation: one dot per section, active dot follows the scroll
    struct DotNav {
        dots: Vec<(String, Element)>,
        sections: Vec<(String, HtmlElement)>,
    }

    impl DotNav {
        fn update(&self) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32;

            let bounds: Vec<SectionBounds> = self
                .sections
                .iter()
                .map(|(id, el)| {
                    let rect = el.get_bounding_client_rect();
                    SectionBounds::new(id.clone(), rect.top() as f32 + scroll_y, rect.height() as f32)
                })
                .collect();

            let active = active_section(
                Viewport { scroll_y, height },
                &bounds,
            )
            .map(str::to_string);

            for (id, dot) in &self.dots {
                let class = if active.as_deref() == Some(id.as_str()) {
                    "dot-item active"
                } else {
                    "dot-item"
                };
                let _ = dot.set_attribute("class", class);
            }
        }
    }

    /// App instance holding all page bindings
    struct App {
        philosophy: Option<Philosophy>,
        cursor: Option<CursorRig>,
        nav: Option<DotNav>,
        header: Option<HtmlElement>,
        header_state: HeaderState,
        mouse: Vec2,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("onda starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let system_reduced = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|mql| mql.matches())
            .unwrap_or(false);
        let reduced_motion = settings.effective_reduced_motion(system_reduced);
        if reduced_motion {
            log::info!("Reduced motion active: waves disabled, immediate text swaps");
        }

        let philosophy = setup_philosophy(&document, &settings, reduced_motion);
        if philosophy.is_none() {
            log::warn!("Philosophy elements or 2d context unavailable, ripple effect disabled");
        }

        let cursor = if settings.custom_cursor && !reduced_motion {
            setup_cursor(&document, &window)
        } else {
            None
        };

        let nav = setup_dot_nav(&document);
        let header = document
            .query_selector(".site-header")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let mouse = Vec2::new(
            window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32 / 2.0,
            window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32 / 2.0,
        );

        let app = Rc::new(RefCell::new(App {
            philosophy,
            cursor,
            nav,
            header,
            header_state: HeaderState::default(),
            mouse,
        }));

        setup_pointer_handlers(app.clone());
        setup_scroll_handler(app.clone(), &window);
        setup_resize_handler(app.clone(), &window);
        setup_mouse_tracking(app.clone(), &window);
        setup_magnetic(&document);
        setup_blobs(&document);

        // Initial dot state before the first scroll event
        if let Some(ref nav) = app.borrow().nav {
            nav.update();
        }

        request_animation_frame(app);

        log::info!("onda running!");
    }

    fn setup_philosophy(
        document: &Document,
        settings: &Settings,
        reduced_motion: bool,
    ) -> Option<Philosophy> {
        let section: HtmlElement = document
            .query_selector(".philosophy")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;
        let quote_el: HtmlElement = document
            .get_element_by_id("philosophyQuote")?
            .dyn_into()
            .ok()?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("waterCanvas")?
            .dyn_into()
            .ok()?;

        let dpr = web_sys::window()?.device_pixel_ratio();
        // A denied 2d context leaves the whole binding unconstructed
        let mut surface = CanvasSurface::new(canvas, dpr)?;

        let rect = section.get_bounding_client_rect();
        let (w, h) = (rect.width() as f32, rect.height() as f32);
        surface.resize(w, h);

        let indicator: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let _ = indicator.set_attribute("class", "philosophy-indicator");
        let _ = section.append_child(&indicator);

        let quotes = parse_quotes(QUOTE_SOURCE);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!(
            "Philosophy bound: {} quotes, {w:.0}x{h:.0} surface, seed {seed}",
            quotes.len()
        );

        let sim = WaveSimulator::new(w, h, seed);
        let display = DomQuoteDisplay { quote_el, indicator };
        let narrator = PhilosophyNarrator::new(sim, display, quotes, reduced_motion);

        Some(Philosophy {
            narrator,
            surface,
            section,
            glow: settings.glow,
        })
    }

    fn setup_pointer_handlers(app: Rc<RefCell<App>>) {
        let section = match app.borrow().philosophy.as_ref() {
            Some(p) => p.section.clone(),
            None => return,
        };

        // Mouse click and pointerdown both route here; the busy guard absorbs
        // the double fire
        for event_name in ["click", "pointerdown"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                if let Some(p) = app.borrow_mut().philosophy.as_mut() {
                    p.pointer(client);
                }
            });
            let _ = section
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    if let Some(p) = app.borrow_mut().philosophy.as_mut() {
                        p.pointer(client);
                    }
                }
            });
            let _ = section
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_scroll_handler(app: Rc<RefCell<App>>, window: &web_sys::Window) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let scroll_y = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or(0.0) as f32;

            let mut a = app.borrow_mut();
            let visible = a.header_state.on_scroll(scroll_y);
            if let Some(ref header) = a.header {
                let _ = header.style().set_property(
                    "transform",
                    if visible { "translateY(0)" } else { "translateY(-100%)" },
                );
            }
            if let Some(ref nav) = a.nav {
                nav.update();
            }
        });
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>, window: &web_sys::Window) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(p) = app.borrow_mut().philosophy.as_mut() {
                p.resize();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_mouse_tracking(app: Rc<RefCell<App>>, window: &web_sys::Window) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            app.borrow_mut().mouse = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        });
        let _ = window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_cursor(document: &Document, window: &web_sys::Window) -> Option<CursorRig> {
        let dot: HtmlElement = document
            .query_selector(".cursor-dot")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;
        let ring: HtmlElement = document
            .query_selector(".cursor-ring")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;
        let crown = document
            .query_selector(".cursor-crown")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let start = Vec2::new(
            window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32 / 2.0,
            window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32 / 2.0,
        );

        Some(CursorRig {
            dot,
            ring,
            crown,
            ring_follow: Follower::new(start, motion::RING_FOLLOW),
            crown_follow: Follower::new(start, motion::CROWN_FOLLOW),
        })
    }

    fn setup_dot_nav(document: &Document) -> Option<DotNav> {
        let dot_list = document.query_selector_all(".dot-item").ok()?;
        if dot_list.length() == 0 {
            return None;
        }

        let mut dots = Vec::new();
        for i in 0..dot_list.length() {
            let el: Element = dot_list.item(i)?.dyn_into().ok()?;
            let id = el.get_attribute("data-section")?;
            dots.push((id, el));
        }

        let mut sections = Vec::new();
        for id in NAV_SECTIONS {
            if let Some(el) = document.get_element_by_id(id) {
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    sections.push((id.to_string(), el));
                }
            }
        }
        if sections.is_empty() {
            log::warn!("Dot navigation present but no sections found");
            return None;
        }

        // Click scrolls to the matching section
        for (id, dot) in &dots {
            let target = sections
                .iter()
                .find(|(sid, _)| sid == id)
                .map(|(_, el)| el.clone());
            if let Some(target) = target {
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.prevent_default();
                    target.scroll_into_view();
                });
                let _ = dot.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        Some(DotNav { dots, sections })
    }

    fn setup_magnetic(document: &Document) {
        let magnets = match document.query_selector_all(".magnetic") {
            Ok(list) => list,
            Err(_) => return,
        };

        for i in 0..magnets.length() {
            let el: HtmlElement = match magnets.item(i).and_then(|n| n.dyn_into().ok()) {
                Some(el) => el,
                None => continue,
            };

            {
                let el = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let rect = el.get_bounding_client_rect();
                    let rel = Vec2::new(
                        event.client_x() as f32 - rect.left() as f32 - rect.width() as f32 / 2.0,
                        event.client_y() as f32 - rect.top() as f32 - rect.height() as f32 / 2.0,
                    );
                    let offset = motion::magnetic_offset(rel);
                    let _ = el.style().set_property(
                        "transform",
                        &format!("translate({:.1}px, {:.1}px)", offset.x, offset.y),
                    );
                });
                let _ = el
                    .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let el = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let _ = el.style().set_property("transform", "translate(0, 0)");
                });
                let _ = el
                    .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_blobs(document: &Document) {
        let hero: HtmlElement = match document
            .query_selector(".hero")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into().ok())
        {
            Some(el) => el,
            None => return,
        };

        let blobs: Vec<HtmlElement> = ["b1", "b2", "b3"]
            .iter()
            .filter_map(|name| {
                document
                    .query_selector(&format!(".blob.{name}"))
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into().ok())
            })
            .collect();
        if blobs.is_empty() {
            return;
        }

        // Ease the transform so pointer jumps never snap the blobs
        for blob in &blobs {
            let _ = blob
                .style()
                .set_property("transition", "transform 0.6s ease-out");
        }

        let hero_el = hero.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = hero_el.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let norm = Vec2::new(
                (event.client_x() as f32 - rect.left() as f32) / rect.width() as f32,
                (event.client_y() as f32 - rect.top() as f32) / rect.height() as f32,
            );
            for (blob, offset) in blobs.iter().zip(motion::blob_offsets(norm)) {
                let _ = blob.style().set_property(
                    "transform",
                    &format!("translate({:.1}px, {:.1}px)", offset.x, offset.y),
                );
            }
        });
        let _ = hero.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let mouse = a.mouse;
            if let Some(rig) = a.cursor.as_mut() {
                rig.step(mouse);
            }
            if let Some(p) = a.philosophy.as_mut() {
                p.frame();
            }
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("onda (native) starting...");
    log::info!("Canvas binding needs the wasm target - run with `trunk serve` for the web version");

    println!("\nRunning ripple smoke run...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use onda::sim::WaveSimulator;

    let mut sim = WaveSimulator::new(400.0, 300.0, 42);
    assert!(sim.trigger(100.0, 50.0));
    assert!(!sim.trigger(300.0, 200.0), "second trigger must be dropped");

    let mut ticks = 1u32;
    while sim.tick() {
        ticks += 1;
    }
    assert!(!sim.is_animating());
    assert!(sim.waves().is_empty());
    println!("✓ Ripple cycle drained in {ticks} ticks");
}
