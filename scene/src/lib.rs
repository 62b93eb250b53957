// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

//! KDL scene files for the `layout-adsorb` engine.
//!
//! ```kdl
//! adsorb-distance 6
//! rect 1 left=0 top=0 width=100 height=50
//! active 3 left=50 top=0 width=100 height=50
//! adsorb-lines "v" 120 240.5
//! grid-lines "h" 0 50 100
//! drag 0 0
//! drag 44 0
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use kdl::{KdlDocument, KdlError, KdlNode, KdlValue};
use layout_adsorb::{Axis, Config, Engine, Rect};

/// A parsed scene: the engine configuration plus the drag frames to replay.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub config: Config,
    pub drags: Vec<(f64, f64)>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("scene KDL format error")]
    Kdl(#[from] KdlError),
    #[error("could not read scene file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{node}` node is missing `{attribute}`")]
    MissingAttribute {
        node: String,
        attribute: &'static str,
    },
    #[error("`{node}` node has an invalid `{attribute}`")]
    InvalidValue {
        node: String,
        attribute: &'static str,
    },
}

impl Scene {
    /// Reads and parses the scene file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        std::fs::read_to_string(path)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?
            .parse()
    }

    /// An engine configured from this scene, with no frame computed yet.
    #[must_use]
    pub fn engine(&self) -> Engine {
        Engine::new(self.config.clone())
    }
}

impl FromStr for Scene {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let document = source.parse::<KdlDocument>()?;
        let mut scene = Scene::default();
        let config = &mut scene.config;

        for node in document.nodes() {
            match node.name().value() {
                "adsorb-distance" => {
                    let Some(distance) = node.entries().first().and_then(|e| number(e.value()))
                    else {
                        return Err(invalid(node, "distance"));
                    };

                    config.adsorb_distance = distance;
                }

                "rect" => config.rects.push(rect(node)?),

                "active" => config.active = Some(rect(node)?),

                "adsorb-lines" => {
                    if let Some((axis, positions)) = axis_positions(node)? {
                        match axis {
                            Axis::Vertical => config.adsorb_v_lines.extend(positions),
                            Axis::Horizontal => config.adsorb_h_lines.extend(positions),
                        }
                    }
                }

                "grid-lines" => {
                    if let Some((axis, positions)) = axis_positions(node)? {
                        match axis {
                            Axis::Vertical => config.grid_v_lines.extend(positions),
                            Axis::Horizontal => config.grid_h_lines.extend(positions),
                        }
                    }
                }

                "drag" => {
                    let [dx, dy, ..] = node.entries() else {
                        return Err(missing(node, "offset"));
                    };

                    let (Some(dx), Some(dy)) = (number(dx.value()), number(dy.value())) else {
                        return Err(invalid(node, "offset"));
                    };

                    scene.drags.push((dx, dy));
                }

                name => tracing::warn!(name, "skipping unknown scene node"),
            }
        }

        Ok(scene)
    }
}

// `#nan` and `#inf` are rejected so every replayed value prints back as KDL.
fn number(value: &KdlValue) -> Option<f64> {
    match value {
        KdlValue::Integer(value) => Some(*value as f64),
        KdlValue::Float(value) if value.is_finite() => Some(*value),
        _ => None,
    }
}

fn missing(node: &KdlNode, attribute: &'static str) -> Error {
    Error::MissingAttribute {
        node: node.name().value().to_owned(),
        attribute,
    }
}

fn invalid(node: &KdlNode, attribute: &'static str) -> Error {
    Error::InvalidValue {
        node: node.name().value().to_owned(),
        attribute,
    }
}

// Parses `<name> <id> left= top= width= height=`.
fn rect(node: &KdlNode) -> Result<Rect, Error> {
    let mut entries = node.entries().iter();

    // The first value is the id of the rectangle.
    let id = match entries.next().map(|entry| entry.value()) {
        Some(KdlValue::Integer(id)) => u64::try_from(*id).map_err(|_| invalid(node, "id"))?,
        Some(_) => return Err(invalid(node, "id")),
        None => return Err(missing(node, "id")),
    };

    let (mut left, mut top, mut width, mut height) = (None, None, None, None);

    for entry in entries {
        let Some(name) = entry.name() else {
            continue;
        };

        let slot = match name.value() {
            "left" => &mut left,
            "top" => &mut top,
            "width" => &mut width,
            "height" => &mut height,
            _ => continue,
        };

        *slot = Some(number(entry.value()).ok_or_else(|| invalid(node, "geometry"))?);
    }

    let require = |value: Option<f64>, attribute| value.ok_or_else(|| missing(node, attribute));

    let rect = Rect::new(
        id,
        require(left, "left")?,
        require(top, "top")?,
        require(width, "width")?,
        require(height, "height")?,
    );

    if rect.width < 0.0 || rect.height < 0.0 {
        return Err(invalid(node, "size"));
    }

    Ok(rect)
}

// Parses `<name> <axis> <positions...>`, skipping unknown axis tokens.
fn axis_positions(node: &KdlNode) -> Result<Option<(Axis, Vec<f64>)>, Error> {
    let mut entries = node.entries().iter();

    let Some(token) = entries.next().and_then(|entry| entry.value().as_string()) else {
        return Err(missing(node, "axis"));
    };

    let axis = match token.parse::<Axis>() {
        Ok(axis) => axis,
        Err(why) => {
            tracing::warn!(node = node.name().value(), %why, "skipping lines");
            return Ok(None);
        }
    };

    let positions = entries
        .map(|entry| number(entry.value()).ok_or_else(|| invalid(node, "position")))
        .collect::<Result<Vec<f64>, Error>>()?;

    Ok(Some((axis, positions)))
}
