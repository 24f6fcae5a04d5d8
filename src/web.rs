//! Browser host: binds the session to the page markup.
//!
//! DOM listeners only enqueue [`InputEvent`]s. A requestAnimationFrame loop
//! drains that queue in order, then pumps the session timeline with
//! `performance.now()`. The markup contract (ids / classes) is the one the
//! game's HTML ships with:
//! - `.screen` panels, slid away with class `up`
//! - `#start-btn`, `.choose-insect-btn > img`, `#restart-btn`
//! - `#time`, `#score`, `#attempts`, `#message` (`visible`), `#game-over` (`hidden`)
//! - `.attempt-icon` row (`active`), `#game-container` holding `.insect` divs

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::position::SpawnRng;
use crate::session::{InputEvent, Session};
use crate::state::{InsectId, Point, Sprite, Viewport};
use crate::surface::{DisplaySurface, Screen};
use crate::timeline::Millis;

const INSECT_ID_ATTR: &str = "data-insect-id";

type WebSession = Session<WebSurface, SpawnRng>;

struct Runner {
    session: WebSession,
    input: WebInput,
}

thread_local! {
    static RUNNER: RefCell<Option<Runner>> = const { RefCell::new(None) };
}

fn now_ms() -> Millis {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0) as Millis
}

fn viewport() -> Option<Viewport> {
    let w = window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport { width, height })
}

fn by_id(doc: &Document, id: &'static str) -> Result<Element, GameError> {
    doc.get_element_by_id(id).ok_or(GameError::MissingElement(id))
}

fn all(root_doc: &Document, selector: &str) -> Result<Vec<Element>, GameError> {
    let list = root_doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

fn report(res: Result<(), JsValue>, what: &str) {
    if let Err(e) = res {
        log::warn!("{what} failed: {e:?}");
    }
}

// --- Display surface ---------------------------------------------------------

pub struct WebSurface {
    doc: Document,
    time: Element,
    score: Element,
    attempts: Element,
    message: Element,
    game_over: Element,
    container: Element,
    attempt_icons: Vec<Element>,
    screens: Vec<Element>,
    insects: HashMap<InsectId, Element>,
}

impl WebSurface {
    pub fn from_document(doc: &Document) -> Result<Self, GameError> {
        Ok(Self {
            doc: doc.clone(),
            time: by_id(doc, "time")?,
            score: by_id(doc, "score")?,
            attempts: by_id(doc, "attempts")?,
            message: by_id(doc, "message")?,
            game_over: by_id(doc, "game-over")?,
            container: by_id(doc, "game-container")?,
            attempt_icons: all(doc, ".attempt-icon")?,
            screens: all(doc, ".screen")?,
            insects: HashMap::new(),
        })
    }

    fn build_insect(&self, id: InsectId, position: Point, sprite: &Sprite, rotation_deg: f64) -> Result<Element, JsValue> {
        let el = self.doc.create_element("div")?;
        el.class_list().add_1("insect")?;
        el.set_attribute(INSECT_ID_ATTR, &id.0.to_string())?;
        el.set_attribute("style", &format!("top:{:.0}px;left:{:.0}px;", position.y, position.x))?;
        let img = self.doc.create_element("img")?;
        img.set_attribute("src", &sprite.image_ref)?;
        img.set_attribute("alt", &sprite.label)?;
        img.set_attribute("style", &format!("transform: rotate({rotation_deg:.1}deg)"))?;
        el.append_child(&img)?;
        self.container.append_child(&el)?;
        Ok(el)
    }
}

impl DisplaySurface for WebSurface {
    fn render_time(&mut self, clock: &str) {
        self.time.set_inner_html(&format!("Time: {clock}"));
    }

    fn render_score(&mut self, score: u32) {
        self.score.set_inner_html(&format!("Score: {score}"));
    }

    fn render_attempts(&mut self, attempts_remaining: u32) {
        self.attempts.set_inner_html(&format!("Attempts Left: {attempts_remaining}"));
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        let Some(icon) = self.attempt_icons.get(index) else {
            return;
        };
        let classes = icon.class_list();
        report(
            if active { classes.add_1("active") } else { classes.remove_1("active") },
            "attempt icon toggle",
        );
    }

    fn show_milestone_message(&mut self) {
        report(self.message.class_list().add_1("visible"), "show message");
    }

    fn hide_milestone_message(&mut self) {
        report(self.message.class_list().remove_1("visible"), "hide message");
    }

    fn show_game_over_overlay(&mut self) {
        report(self.game_over.class_list().remove_1("hidden"), "show game over");
    }

    fn hide_game_over_overlay(&mut self) {
        report(self.game_over.class_list().add_1("hidden"), "hide game over");
    }

    fn spawn_insect_visual(&mut self, id: InsectId, position: Point, sprite: &Sprite, rotation_deg: f64) {
        match self.build_insect(id, position, sprite, rotation_deg) {
            Ok(el) => {
                self.insects.insert(id, el);
            }
            Err(e) => log::warn!("spawning {id:?} failed: {e:?}"),
        }
    }

    fn mark_insect_caught(&mut self, id: InsectId) {
        if let Some(el) = self.insects.get(&id) {
            report(el.class_list().add_1("caught"), "mark caught");
        }
    }

    fn remove_insect(&mut self, id: InsectId) {
        if let Some(el) = self.insects.remove(&id) {
            el.remove();
        }
    }

    fn remove_all_insects(&mut self) {
        self.insects.clear();
        // also sweeps nodes the map no longer tracks
        match self.container.query_selector_all(".insect") {
            Ok(list) => {
                for i in 0..list.length() {
                    if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        el.remove();
                    }
                }
            }
            Err(e) => log::warn!("insect sweep failed: {e:?}"),
        }
    }

    fn advance_screen(&mut self, screen: Screen) {
        if let Some(el) = self.screens.get(screen.index()) {
            report(el.class_list().add_1("up"), "advance screen");
        }
    }
}

// --- Input wiring ------------------------------------------------------------

/// Resolve a container click to the insect under the pointer, if any.
fn hit_insect(target: &Element) -> Option<InsectId> {
    let insect = target.closest(".insect").ok()??;
    insect.get_attribute(INSECT_ID_ATTR)?.parse().ok().map(InsectId)
}

/// The game-over overlay sits inside the play area; its clicks are not play.
fn in_overlay(target: &Element) -> bool {
    matches!(target.closest("#game-over"), Ok(Some(_)))
}

fn sprite_of(button: &Element) -> Option<Sprite> {
    let img = button.query_selector("img").ok()??;
    let src = img.get_attribute("src")?;
    let alt = img.get_attribute("alt").unwrap_or_default();
    Some(Sprite::new(src, alt))
}

fn listen<F>(target: &Element, kind: &str, handler: F) -> Result<(), GameError>
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::MouseEvent)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type InputQueue = Rc<RefCell<VecDeque<InputEvent>>>;

/// Single FIFO channel fed by the page's click listeners.
pub struct WebInput {
    queue: InputQueue,
}

impl WebInput {
    /// Hook the start, sprite, restart and play-area listeners of `doc`.
    pub fn attach(doc: &Document) -> Result<Self, GameError> {
        let queue: InputQueue = Rc::new(RefCell::new(VecDeque::new()));

        let q = queue.clone();
        listen(&by_id(doc, "start-btn")?, "click", move |_| {
            q.borrow_mut().push_back(InputEvent::StartPressed)
        })?;

        let q = queue.clone();
        listen(&by_id(doc, "restart-btn")?, "click", move |evt| {
            // the button lives inside #game-container; keep the click from counting as a miss
            evt.stop_propagation();
            q.borrow_mut().push_back(InputEvent::RestartPressed);
        })?;

        for btn in all(doc, ".choose-insect-btn")? {
            let source = btn.clone();
            let q = queue.clone();
            listen(&btn, "click", move |_| match sprite_of(&source) {
                Some(sprite) => q.borrow_mut().push_back(InputEvent::SpriteChosen(sprite)),
                None => log::warn!("sprite button without an <img src>"),
            })?;
        }

        let q = queue.clone();
        listen(&by_id(doc, "game-container")?, "click", move |evt| {
            let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if in_overlay(&target) {
                return;
            }
            let point = Point { x: evt.client_x() as f64, y: evt.client_y() as f64 };
            let hit = hit_insect(&target);
            q.borrow_mut().push_back(InputEvent::SurfaceClicked { point, hit });
        })?;

        Ok(Self { queue })
    }

    /// Everything queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

// --- Entry & frame loop ------------------------------------------------------

pub fn start_web_mode(config: GameConfig) -> Result<(), GameError> {
    if RUNNER.with(|r| r.borrow().is_some()) {
        log::warn!("game already running; start ignored");
        return Ok(());
    }
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let surface = WebSurface::from_document(&doc)?;
    let input = WebInput::attach(&doc)?;

    let mut session = Session::new(config, surface, SpawnRng::from_entropy()?);
    if let Some(vp) = viewport() {
        session.set_viewport(vp);
    }
    RUNNER.with(|r| r.replace(Some(Runner { session, input })));
    log::info!("insect catch ready");

    start_session_loop();
    Ok(())
}

/// Debug view of the running session as JSON.
#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Result<String, GameError> {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(r) => Ok(serde_json::to_string(&r.session.snapshot())?),
        None => Ok("null".to_string()),
    })
}

fn pump(runner: &mut Runner) {
    let now = now_ms();
    if let Some(vp) = viewport() {
        runner.session.set_viewport(vp);
    }
    for event in runner.input.drain() {
        runner.session.handle(event, now);
    }
    runner.session.advance(now);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_session_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        RUNNER.with(|cell| {
            if let Some(runner) = cell.borrow_mut().as_mut() {
                pump(runner);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
