//! Court Smash entry point
//!
//! Wires the browser host (canvas 2D context, DOM buttons, image loading,
//! requestAnimationFrame) to the deterministic sim. Native builds have no
//! renderer and just print a hint.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use court_smash::BestScore;
    use court_smash::assets::{AssetError, AssetManifest};
    use court_smash::render::{DrawSurface, Sprite, render};
    use court_smash::sim::{FrameInput, GameEvent, GamePhase, GameState, Rect, Viewport, update};
    use court_smash::ui::Toast;

    /// All images, fully loaded before the first frame
    struct Images {
        background: HtmlImageElement,
        player: HtmlImageElement,
        bullet: HtmlImageElement,
        enemies: Vec<HtmlImageElement>,
    }

    /// Canvas-backed implementation of the sim's draw surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: Images,
        viewport: Viewport,
    }

    impl CanvasSurface {
        fn image_for(&self, sprite: Sprite) -> &HtmlImageElement {
            match sprite {
                Sprite::Background => &self.images.background,
                Sprite::Player => &self.images.player,
                Sprite::Bullet => &self.images.bullet,
                Sprite::Enemy(variant) => {
                    &self.images.enemies[variant as usize % self.images.enemies.len()]
                }
            }
        }
    }

    impl DrawSurface for CanvasSurface {
        fn sprite_size(&self, sprite: Sprite) -> Option<(f32, f32)> {
            let img = self.image_for(sprite);
            let (w, h) = (img.natural_width(), img.natural_height());
            (w > 0 && h > 0).then_some((w as f32, h as f32))
        }

        fn fill_background(&mut self) {
            self.ctx.set_fill_style_str("#0d5fc7");
            self.ctx
                .fill_rect(0.0, 0.0, self.viewport.w as f64, self.viewport.h as f64);
        }

        fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
            let img = self.image_for(sprite).clone();
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &img,
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }
    }

    /// Game instance holding sim state and host-side bits
    struct Game {
        state: GameState,
        input: FrameInput,
        toast: Toast,
        best: BestScore,
        surface: CanvasSurface,
        last_time: f64,
    }

    impl Game {
        /// One host frame: update, drain events, render, sync HUD
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let viewport = query_viewport();
            self.surface.viewport = viewport;

            update(&mut self.state, &self.input, viewport, dt);
            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.start = false;

            for event in self.state.drain_events() {
                if let GameEvent::NewBest(best) = event {
                    if self.best.record(best) {
                        self.best.save();
                    }
                    self.toast.show();
                }
            }
            self.toast.tick(dt);

            render(&self.state, viewport, &mut self.surface);

            set_text("score", &self.state.score.to_string());
            set_text("best", &self.state.best.to_string());
            set_hidden("toast", !self.toast.visible());
            set_hidden("overlay", self.state.phase == GamePhase::Running);
        }
    }

    fn query_viewport() -> Viewport {
        let window = web_sys::window().unwrap();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(w as f32, h as f32)
    }

    /// Match the canvas backing store to the window, scaled for the display
    fn resize_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) {
        let window = web_sys::window().unwrap();
        let dpr = window.device_pixel_ratio().clamp(1.0, 3.0);
        let viewport = query_viewport();
        canvas.set_width((viewport.w as f64 * dpr) as u32);
        canvas.set_height((viewport.h as f64 * dpr) as u32);
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Load one image, resolving when the browser has decoded it
    async fn load_image(src: &str) -> Result<HtmlImageElement, AssetError> {
        let img = HtmlImageElement::new().map_err(|_| AssetError::ImageLoad {
            path: src.to_string(),
        })?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(src);
        JsFuture::from(promise)
            .await
            .map_err(|_| AssetError::ImageLoad {
                path: src.to_string(),
            })?;
        Ok(img)
    }

    async fn load_images(manifest: &AssetManifest) -> Result<Images, AssetError> {
        let background = load_image(manifest.background).await?;
        let player = load_image(manifest.player).await?;
        let bullet = load_image(manifest.bullet).await?;
        let mut enemies = Vec::with_capacity(manifest.enemies.len());
        for src in manifest.enemies {
            enemies.push(load_image(src).await?);
        }
        log::info!("All {} images loaded", 3 + enemies.len());
        Ok(Images {
            background,
            player,
            bullet,
            enemies,
        })
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Blocking notice shown when resource loading fails; the game never starts
    fn fatal_error(err: &AssetError) {
        log::error!("startup failed: {err}");
        set_text("overlay", &format!("Could not start: {err}"));
        set_hidden("overlay", false);
    }

    /// Wire a held-direction button: pressed sets the flag, released clears it
    fn bind_hold(game: &Rc<RefCell<Game>>, id: &str, set: fn(&mut FrameInput, bool)) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("missing control element #{id}");
            return;
        };

        for event in ["touchstart", "mousedown"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: web_sys::Event| {
                e.prevent_default();
                set(&mut game.borrow_mut().input, true);
            });
            let _ = btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for event in ["touchend", "touchcancel", "mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: web_sys::Event| {
                e.prevent_default();
                set(&mut game.borrow_mut().input, false);
            });
            let _ = btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire an edge-triggered button (fire/start)
    fn bind_tap(game: &Rc<RefCell<Game>>, id: &str, set: fn(&mut FrameInput)) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("missing control element #{id}");
            return;
        };

        for event in ["touchstart", "mousedown"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: web_sys::Event| {
                e.prevent_default();
                set(&mut game.borrow_mut().input);
            });
            let _ = btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    " " => g.input.fire = true,
                    "Enter" => g.input.start = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&canvas, &ctx);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Court Smash starting...");

        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("missing #game canvas")
            .dyn_into()
            .expect("#game is not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("2d context unavailable")
            .dyn_into()
            .unwrap();

        resize_canvas(&canvas, &ctx);
        setup_resize(canvas.clone(), ctx.clone());

        // The loop does not start until every image is available
        let images = match load_images(&AssetManifest::default()).await {
            Ok(images) => images,
            Err(err) => {
                fatal_error(&err);
                return;
            }
        };

        let best = BestScore::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, best.best),
            input: FrameInput::default(),
            toast: Toast::new(),
            best,
            surface: CanvasSurface {
                ctx,
                images,
                viewport: query_viewport(),
            },
            last_time: 0.0,
        }));

        set_text("best", &game.borrow().best.best.to_string());
        set_hidden("overlay", false);

        bind_hold(&game, "leftBtn", |input, held| input.left = held);
        bind_hold(&game, "rightBtn", |input, held| input.right = held);
        bind_tap(&game, "fireBtn", |input| input.fire = true);
        bind_tap(&game, "startBtn", |input| input.start = true);
        bind_tap(&game, "overlay", |input| input.start = true);
        setup_keyboard(&game);

        log::info!("Game ready (seed {seed})");
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Court Smash (native) starting...");
    log::info!("The renderer is browser-only - run with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
