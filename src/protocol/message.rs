//! Inbound notifications from the editor core.

use crate::display::{Attribute, GlyphRun, Rgb, ViewId, ViewKind, ViewSpec};
use crate::error::{CoreError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    UpdateForeground(Rgb),
    UpdateBackground(Rgb),
    MakeView(ViewSpec),
    DeleteView(ViewId),
    ResizeView {
        id: ViewId,
        width: i32,
        height: i32,
    },
    MoveView {
        id: ViewId,
        x: i32,
        y: i32,
    },
    Clear(ViewId),
    ClearEol {
        id: ViewId,
        x: i32,
        y: i32,
    },
    ClearEob {
        id: ViewId,
        x: i32,
        y: i32,
    },
    Put {
        id: ViewId,
        x: i32,
        y: i32,
        chars: Vec<GlyphRun>,
        attribute: Option<Attribute>,
    },
    ModelinePut {
        id: ViewId,
        x: i32,
        chars: Vec<GlyphRun>,
        attribute: Option<Attribute>,
    },
    Touch(ViewId),
    MoveCursor {
        id: ViewId,
        x: i32,
        y: i32,
    },
    Scroll {
        id: ViewId,
        n: i32,
    },
    SetFont {
        name: String,
        size: f32,
    },
    SetPane(Vec<u8>),
    DeletePane,
    UpdateDisplay,
    Exit,
}

impl Notification {
    pub fn method(&self) -> &'static str {
        match self {
            Notification::UpdateForeground(_) => "update-foreground",
            Notification::UpdateBackground(_) => "update-background",
            Notification::MakeView(_) => "make-view",
            Notification::DeleteView(_) => "delete-view",
            Notification::ResizeView { .. } => "resize-view",
            Notification::MoveView { .. } => "move-view",
            Notification::Clear(_) => "clear",
            Notification::ClearEol { .. } => "clear-eol",
            Notification::ClearEob { .. } => "clear-eob",
            Notification::Put { .. } => "put",
            Notification::ModelinePut { .. } => "modeline-put",
            Notification::Touch(_) => "touch",
            Notification::MoveCursor { .. } => "move-cursor",
            Notification::Scroll { .. } => "scroll",
            Notification::SetFont { .. } => "set-font",
            Notification::SetPane(_) => "set-pane",
            Notification::DeletePane => "delete-pane",
            Notification::UpdateDisplay => "update-display",
            Notification::Exit => "exit",
        }
    }

    /// The view this notification addresses, if any.
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Notification::MakeView(spec) => Some(spec.id),
            Notification::DeleteView(id)
            | Notification::Clear(id)
            | Notification::Touch(id)
            | Notification::ResizeView { id, .. }
            | Notification::MoveView { id, .. }
            | Notification::ClearEol { id, .. }
            | Notification::ClearEob { id, .. }
            | Notification::Put { id, .. }
            | Notification::ModelinePut { id, .. }
            | Notification::MoveCursor { id, .. }
            | Notification::Scroll { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ViewInfo {
    id: ViewId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewOnly {
    view_info: ViewInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewAt {
    view_info: ViewInfo,
    x: i32,
    y: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewSize {
    view_info: ViewInfo,
    width: i32,
    height: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewPut {
    view_info: ViewInfo,
    x: i32,
    y: i32,
    chars: Vec<GlyphRun>,
    #[serde(default)]
    attribute: Option<Attribute>,
}

/// The modeline is a single row; a `y` sent along is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelinePut {
    view_info: ViewInfo,
    x: i32,
    chars: Vec<GlyphRun>,
    #[serde(default)]
    attribute: Option<Attribute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewScroll {
    view_info: ViewInfo,
    n: i32,
}

#[derive(Deserialize)]
struct MakeView {
    id: ViewId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    #[serde(default, deserialize_with = "flag")]
    use_modeline: bool,
    #[serde(default)]
    kind: ViewKind,
}

#[derive(Deserialize)]
struct SetFont {
    name: String,
    size: f32,
}

#[derive(Deserialize)]
struct SetPane {
    html: Vec<u8>,
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

fn parse<T: DeserializeOwned>(method: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| CoreError::malformed(method, e.to_string()))
}

/// Decodes one notification. Unknown names and the code-loading
/// notifications (`js-eval`, `import`) are rejected as malformed.
pub fn decode(method: &str, params: Value) -> Result<Notification> {
    let msg = match method {
        "update-foreground" => Notification::UpdateForeground(parse(method, params)?),
        "update-background" => Notification::UpdateBackground(parse(method, params)?),
        "make-view" => {
            let p: MakeView = parse(method, params)?;
            Notification::MakeView(ViewSpec {
                id: p.id,
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
                use_modeline: p.use_modeline,
                kind: p.kind,
            })
        }
        "delete-view" => Notification::DeleteView(parse::<ViewOnly>(method, params)?.view_info.id),
        "resize-view" => {
            let p: ViewSize = parse(method, params)?;
            Notification::ResizeView {
                id: p.view_info.id,
                width: p.width,
                height: p.height,
            }
        }
        "move-view" => {
            let p: ViewAt = parse(method, params)?;
            Notification::MoveView {
                id: p.view_info.id,
                x: p.x,
                y: p.y,
            }
        }
        "clear" => Notification::Clear(parse::<ViewOnly>(method, params)?.view_info.id),
        "clear-eol" => {
            let p: ViewAt = parse(method, params)?;
            Notification::ClearEol {
                id: p.view_info.id,
                x: p.x,
                y: p.y,
            }
        }
        "clear-eob" => {
            let p: ViewAt = parse(method, params)?;
            Notification::ClearEob {
                id: p.view_info.id,
                x: p.x,
                y: p.y,
            }
        }
        "put" => {
            let p: ViewPut = parse(method, params)?;
            Notification::Put {
                id: p.view_info.id,
                x: p.x,
                y: p.y,
                chars: p.chars,
                attribute: p.attribute,
            }
        }
        "modeline-put" => {
            let p: ModelinePut = parse(method, params)?;
            Notification::ModelinePut {
                id: p.view_info.id,
                x: p.x,
                chars: p.chars,
                attribute: p.attribute,
            }
        }
        "touch" => Notification::Touch(parse::<ViewOnly>(method, params)?.view_info.id),
        "move-cursor" => {
            let p: ViewAt = parse(method, params)?;
            Notification::MoveCursor {
                id: p.view_info.id,
                x: p.x,
                y: p.y,
            }
        }
        "scroll" => {
            let p: ViewScroll = parse(method, params)?;
            Notification::Scroll {
                id: p.view_info.id,
                n: p.n,
            }
        }
        "set-font" => {
            let p: SetFont = parse(method, params)?;
            Notification::SetFont {
                name: p.name,
                size: p.size,
            }
        }
        "set-pane" => Notification::SetPane(parse::<SetPane>(method, params)?.html),
        "delete-pane" => Notification::DeletePane,
        "update-display" => Notification::UpdateDisplay,
        "exit" => Notification::Exit,
        "js-eval" | "import" => {
            return Err(CoreError::malformed(method, "code loading is not supported"));
        }
        _ => return Err(CoreError::malformed(method, "unknown notification")),
    };
    Ok(msg)
}

#[cfg(test)]
#[path = "../../tests/unit/protocol/message.rs"]
mod tests;
