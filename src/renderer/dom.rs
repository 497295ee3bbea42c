//! DOM projection (wasm only)
//!
//! The player and each obstacle are absolutely positioned `div`s inside the
//! game container. Obstacle elements are created and removed in response to
//! game events and keyed by `ObstacleId`.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::sprites::{Frame, Sprite};
use crate::sim::{GameEvent, Layout, ObstacleId};

/// Owns the DOM handles for one play area
pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    player: HtmlElement,
    score: Option<Element>,
    game_over: Option<HtmlElement>,
    obstacles: HashMap<ObstacleId, HtmlElement>,
}

fn html_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an HTML element", id)))
}

fn place(el: &HtmlElement, sprite: &Sprite) {
    let style = el.style();
    let _ = style.set_property("left", &format!("{}px", sprite.left()));
    let _ = style.set_property("top", &format!("{}px", sprite.top()));
}

impl DomRenderer {
    /// Bind to `#game-container` and `#player`. The score readout and the
    /// game-over overlay are optional.
    pub fn attach(document: Document) -> Result<Self, JsValue> {
        let container = html_element(&document, "game-container")?;
        let player = html_element(&document, "player")?;

        let score = document.get_element_by_id("score");
        if score.is_none() {
            log::warn!("No #score element; score will not be shown");
        }
        let game_over = html_element(&document, "game-over-message").ok();
        if game_over.is_none() {
            log::warn!("No #game-over-message element");
        }

        Ok(Self {
            document,
            container,
            player,
            score,
            game_over,
            obstacles: HashMap::new(),
        })
    }

    /// Play area geometry as laid out by the stylesheet
    pub fn measure_layout(&self) -> Layout {
        Layout::measured(
            self.container.offset_width() as f32,
            self.container.offset_height() as f32,
            self.player.offset_width() as f32,
            self.player.offset_height() as f32,
        )
    }

    /// React to state changes: create/remove obstacle elements, update HUD
    pub fn apply_events(&mut self, events: &[GameEvent]) -> Result<(), JsValue> {
        for event in events {
            match *event {
                GameEvent::Started => {
                    for (_, el) in self.obstacles.drain() {
                        el.remove();
                    }
                    self.set_game_over_visible(false);
                }
                GameEvent::ObstacleSpawned { id, .. } => {
                    let el = self
                        .document
                        .create_element("div")?
                        .dyn_into::<HtmlElement>()
                        .map_err(|_| JsValue::from_str("div is not an HTML element"))?;
                    el.class_list().add_1("obstacle")?;
                    self.container.append_child(&el)?;
                    self.obstacles.insert(id, el);
                }
                GameEvent::ObstacleRemoved { id } => {
                    if let Some(el) = self.obstacles.remove(&id) {
                        el.remove();
                    }
                }
                GameEvent::ScoreChanged { score } => {
                    if let Some(el) = &self.score {
                        el.set_text_content(Some(&score.to_string()));
                    }
                }
                GameEvent::GameOver { .. } => self.set_game_over_visible(true),
                GameEvent::PlayerMoved { .. }
                | GameEvent::DifficultyIncreased { .. }
                | GameEvent::Collision { .. } => {}
            }
        }
        Ok(())
    }

    fn set_game_over_visible(&self, visible: bool) {
        if let Some(el) = &self.game_over {
            let display = if visible { "flex" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    /// Write sprite positions into element styles
    pub fn draw(&self, frame: &Frame) {
        place(&self.player, &frame.player);
        for (id, sprite) in &frame.obstacles {
            if let Some(el) = self.obstacles.get(id) {
                place(el, sprite);
            }
        }
    }
}
