use crate::screen::messages::{MouseButton, PointerEvent};
use crate::screen::model::{Point, Rect};
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Panel width in logical (DPI-independent) pixels.
pub const PANEL_WIDTH: u32 = 50;
pub const BUTTON_HEIGHT: i32 = 45;
pub const BUTTON_MARGIN: i32 = 10;
pub const START_Y: i32 = 10;
pub const MAX_PANEL_BUTTONS: usize = 32;
pub const MAX_ID_LEN: usize = 31;
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelButton {
    pub id: String,
    pub label: String,
}

/// Validated replacement for the whole panel. Construction checks every
/// button, so applying an update can never leave a half-parsed list behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelUpdate {
    visible: Option<bool>,
    buttons: Vec<PanelButton>,
}

impl PanelUpdate {
    pub fn new(visible: Option<bool>, buttons: Vec<PanelButton>) -> Result<Self> {
        if buttons.len() > MAX_PANEL_BUTTONS {
            bail!(
                "panel update has {} buttons, at most {MAX_PANEL_BUTTONS} allowed",
                buttons.len()
            );
        }
        let buttons = buttons
            .into_iter()
            .enumerate()
            .map(|(index, button)| validate_button(index, button))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { visible, buttons })
    }

    /// Parse an inbound control message. Messages of another type yield
    /// `Ok(None)`.
    pub fn from_json(text: &str) -> Result<Option<Self>> {
        let envelope: Envelope =
            serde_json::from_str(text).context("malformed control message")?;
        if envelope.kind != "panel" {
            return Ok(None);
        }
        let data = envelope
            .data
            .ok_or_else(|| anyhow!("panel message without data"))?;
        let data: PanelData =
            serde_json::from_value(data).context("malformed panel data")?;
        let buttons = data
            .buttons
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_button(index, entry))
            .collect::<Result<Vec<_>>>()?;
        Self::new(data.visible, buttons).map(Some)
    }

    pub fn visible(&self) -> Option<bool> {
        self.visible
    }

    pub fn buttons(&self) -> &[PanelButton] {
        &self.buttons
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct PanelData {
    buttons: Vec<Value>,
    #[serde(default)]
    visible: Option<bool>,
}

fn parse_button(index: usize, entry: &Value) -> Result<PanelButton> {
    let fields = entry
        .as_object()
        .ok_or_else(|| anyhow!("panel button {index} is not an object"))?;
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("panel button {index} has no string id"))?;
    let label = match fields.get("text").and_then(Value::as_str) {
        Some(text) => text,
        None => legacy_label(fields)
            .ok_or_else(|| anyhow!("panel button {index} ({id}) has no label"))?,
    };
    Ok(PanelButton {
        id: id.to_string(),
        label: label.to_string(),
    })
}

// Older senders name the label field freely; take the first string that is
// not the id, in document order.
fn legacy_label(fields: &Map<String, Value>) -> Option<&str> {
    fields
        .iter()
        .filter(|(key, _)| key.as_str() != "id")
        .find_map(|(_, value)| value.as_str())
}

fn validate_button(index: usize, mut button: PanelButton) -> Result<PanelButton> {
    if button.id.is_empty() {
        bail!("panel button {index} has an empty id");
    }
    if button.id.len() > MAX_ID_LEN {
        bail!(
            "panel button {index} id is {} bytes, at most {MAX_ID_LEN} allowed",
            button.id.len()
        );
    }
    if button.label.len() > MAX_LABEL_LEN {
        let mut end = MAX_LABEL_LEN;
        while !button.label.is_char_boundary(end) {
            end -= 1;
        }
        button.label.truncate(end);
    }
    Ok(button)
}

/// Current panel contents, replaced wholesale by each update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    visible: bool,
    buttons: Vec<PanelButton>,
}

impl Panel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            buttons: Vec::new(),
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn buttons(&self) -> &[PanelButton] {
        &self.buttons
    }

    pub fn apply(&mut self, update: PanelUpdate) {
        if let Some(visible) = update.visible {
            self.visible = visible;
        }
        self.buttons = update.buttons;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Outside,
    Background,
    Button(usize),
}

/// Panel and button rectangles in drawable pixels for the current content
/// rect. The panel spans the full drawable height right of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub buttons: Vec<Rect>,
}

impl PanelLayout {
    pub fn for_screen(
        content_rect: Rect,
        panel_width: i32,
        drawable_height: i32,
        button_count: usize,
    ) -> Self {
        let panel = Rect::new(content_rect.right(), 0, panel_width.max(0), drawable_height);
        let button_width = panel.w - 2 * BUTTON_MARGIN;
        let buttons = (0..button_count as i32)
            .map(|i| {
                Rect::new(
                    panel.x + BUTTON_MARGIN,
                    content_rect.y + START_Y + i * (BUTTON_HEIGHT + BUTTON_MARGIN),
                    button_width,
                    BUTTON_HEIGHT,
                )
            })
            .collect();
        Self { panel, buttons }
    }

    /// Panel membership only looks at x; the panel covers every row.
    pub fn hit_test(&self, point: Point) -> PanelHit {
        if !self.panel.contains_x(point.x) {
            return PanelHit::Outside;
        }
        self.buttons
            .iter()
            .position(|rect| rect.contains(point))
            .map_or(PanelHit::Background, PanelHit::Button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Arrow,
    Hand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Not a panel event; route to the device as usual.
    PassThrough,
    Swallow,
    /// A button was pressed; emit its click and swallow the press.
    Activate { id: String },
    /// Forward the release so a drag started on content ends, then swallow.
    ForwardThenSwallow,
    /// Forward this synthesized release, then swallow the motion.
    ReleaseThenSwallow(PointerEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOutcome {
    pub action: PanelAction,
    /// Cursor to switch to, when the hover state changed.
    pub cursor: Option<CursorShape>,
}

impl PanelOutcome {
    fn pass() -> Self {
        Self {
            action: PanelAction::PassThrough,
            cursor: None,
        }
    }
}

/// Pointer policy of the panel: hover cursor, click interception and the
/// synthetic release for drags that cross from content into the panel.
#[derive(Debug, Clone)]
pub struct PanelOverlay {
    panel: Panel,
    cursor_swap: bool,
    cursor_is_hand: bool,
    pressed_outside: Option<MouseButton>,
}

impl PanelOverlay {
    pub fn new(visible: bool) -> Self {
        Self {
            panel: Panel::new(visible),
            cursor_swap: true,
            cursor_is_hand: false,
            pressed_outside: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn visible(&self) -> bool {
        self.panel.visible()
    }

    pub fn cursor_is_hand(&self) -> bool {
        self.cursor_is_hand
    }

    pub fn pressed_outside(&self) -> bool {
        self.pressed_outside.is_some()
    }

    /// Stop swapping cursors, e.g. when the windowing layer has none.
    pub fn disable_cursor_swap(&mut self) {
        self.cursor_swap = false;
        self.cursor_is_hand = false;
    }

    /// Replace the panel. Returns the cursor to restore if the hovered
    /// button may have disappeared.
    pub fn apply_update(&mut self, update: PanelUpdate) -> Option<CursorShape> {
        self.panel.apply(update);
        if self.cursor_is_hand {
            self.cursor_is_hand = false;
            return Some(CursorShape::Arrow);
        }
        None
    }

    /// Decide what happens to `event`. `drawable_point` is the event position
    /// already scaled to drawable pixels.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        drawable_point: Point,
        layout: &PanelLayout,
    ) -> PanelOutcome {
        if !self.panel.visible() {
            return PanelOutcome::pass();
        }
        let hit = layout.hit_test(drawable_point);
        match *event {
            PointerEvent::Motion { point } => {
                let cursor = self.update_hover(hit);
                let action = match (hit, self.pressed_outside.take()) {
                    (PanelHit::Outside, pressed) => {
                        self.pressed_outside = pressed;
                        PanelAction::PassThrough
                    }
                    (_, Some(button)) => {
                        tracing::debug!(?button, "synthesized release on entering panel");
                        PanelAction::ReleaseThenSwallow(PointerEvent::ButtonUp {
                            point,
                            button,
                            clicks: 1,
                        })
                    }
                    (_, None) => PanelAction::Swallow,
                };
                PanelOutcome { action, cursor }
            }
            PointerEvent::ButtonDown { button, .. } => {
                let action = match hit {
                    PanelHit::Button(index) => match self.panel.buttons().get(index) {
                        Some(button) => PanelAction::Activate {
                            id: button.id.clone(),
                        },
                        None => PanelAction::Swallow,
                    },
                    PanelHit::Background => PanelAction::Swallow,
                    PanelHit::Outside => {
                        self.pressed_outside = Some(button);
                        PanelAction::PassThrough
                    }
                };
                PanelOutcome {
                    action,
                    cursor: None,
                }
            }
            PointerEvent::ButtonUp { .. } => {
                self.pressed_outside = None;
                let action = if hit == PanelHit::Outside {
                    PanelAction::PassThrough
                } else {
                    PanelAction::ForwardThenSwallow
                };
                PanelOutcome {
                    action,
                    cursor: None,
                }
            }
        }
    }

    fn update_hover(&mut self, hit: PanelHit) -> Option<CursorShape> {
        if !self.cursor_swap || self.panel.buttons().is_empty() {
            return None;
        }
        let over_button = matches!(hit, PanelHit::Button(_));
        if over_button == self.cursor_is_hand {
            return None;
        }
        self.cursor_is_hand = over_button;
        Some(if over_button {
            CursorShape::Hand
        } else {
            CursorShape::Arrow
        })
    }
}
