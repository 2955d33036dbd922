//! Data-driven geometry scenarios
//!
//! Each `.scn` file sets up one shape on an in-memory slide with
//! `key = value` lines, then runs steps against it:
//!
//! ```text
//! do <operation> <value>
//! expect <field> = <value>[, <value>]
//! reject <operation> <value> <diagnostic code>
//! ```

use camino::Utf8Path;
use miette::Diagnostic;
use slidegeom::host::{MemoryShape, MemorySlide};
use slidegeom::{Angle, FlipAxis, GeometryOptions, RotatedShape, ShapeHandle, ShapeKind};

/// Scenario files are written with a handful of decimals
const TOLERANCE: f64 = 1e-4;

#[derive(Debug)]
struct Setup {
    kind: ShapeKind,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    rotation: f64,
    lock_aspect_ratio: bool,
    bake_rotation: bool,
    native_rotated_bounds: bool,
    angle_tolerance: f64,
}

impl Default for Setup {
    fn default() -> Self {
        Setup {
            kind: ShapeKind::Picture,
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 50.0,
            rotation: 0.0,
            lock_aspect_ratio: false,
            bake_rotation: true,
            native_rotated_bounds: false,
            angle_tolerance: slidegeom::options::DEFAULT_ANGLE_TOLERANCE,
        }
    }
}

impl Setup {
    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let number = || value.parse::<f64>().map_err(|e| format!("bad number {value:?}: {e}"));
        let flag = || value.parse::<bool>().map_err(|e| format!("bad flag {value:?}: {e}"));
        match key {
            "kind" => self.kind = parse_kind(value)?,
            "left" => self.left = number()?,
            "top" => self.top = number()?,
            "width" => self.width = number()?,
            "height" => self.height = number()?,
            "rotation" => self.rotation = number()?,
            "lock_aspect_ratio" => self.lock_aspect_ratio = flag()?,
            "bake_rotation" => self.bake_rotation = flag()?,
            "native_rotated_bounds" => self.native_rotated_bounds = flag()?,
            "angle_tolerance" => self.angle_tolerance = number()?,
            other => return Err(format!("unknown setup key {other:?}")),
        }
        Ok(())
    }

    fn slide(&self) -> MemorySlide {
        if self.native_rotated_bounds {
            MemorySlide::with_native_rotated_bounds()
        } else {
            MemorySlide::new()
        }
    }

    fn attach(&self, slide: &MemorySlide) -> datatest_stable::Result<RotatedShape<MemoryShape>> {
        let mut handle = slide.add_shape(self.kind, self.left, self.top, self.width, self.height);
        handle.set_rotation(Angle(self.rotation))?;
        handle.set_lock_aspect_ratio(self.lock_aspect_ratio)?;

        let options = GeometryOptions::default()
            .with_bake_rotation(self.bake_rotation)
            .with_angle_tolerance(self.angle_tolerance);
        Ok(RotatedShape::attach_with(handle, Default::default(), options)?)
    }
}

fn parse_kind(value: &str) -> Result<ShapeKind, String> {
    Ok(match value {
        "autoshape" => ShapeKind::AutoShape,
        "freeform" => ShapeKind::Freeform,
        "picture" => ShapeKind::Picture,
        "textbox" => ShapeKind::TextBox,
        "line" => ShapeKind::Line,
        "group" => ShapeKind::Group,
        other => return Err(format!("unknown shape kind {other:?}")),
    })
}

#[derive(Debug)]
enum Step {
    Do { op: String, arg: String },
    Expect { field: String, values: Vec<f64> },
    Reject { op: String, arg: String, code: String },
}

/// Split a scenario into its setup and the numbered steps that follow it
fn parse(source: &str) -> Result<(Setup, Vec<(usize, Step)>), String> {
    let mut setup = Setup::default();
    let mut steps = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let at = |e: String| format!("line {number}: {e}");

        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let words: Vec<&str> = rest.split_whitespace().collect();
        let step = match keyword {
            "do" => match words.as_slice() {
                [op, arg] => Step::Do {
                    op: op.to_string(),
                    arg: arg.to_string(),
                },
                _ => return Err(at(format!("expected `do <op> <value>`, got {line:?}"))),
            },
            "reject" => match words.as_slice() {
                [op, arg, code] => Step::Reject {
                    op: op.to_string(),
                    arg: arg.to_string(),
                    code: code.to_string(),
                },
                _ => return Err(at(format!("expected `reject <op> <value> <code>`, got {line:?}"))),
            },
            "expect" => {
                let (field, values) = rest
                    .split_once('=')
                    .ok_or_else(|| at(format!("expected `expect <field> = <value>`, got {line:?}")))?;
                let values = values
                    .split(',')
                    .map(|v| v.trim().parse::<f64>().map_err(|e| at(format!("bad number {v:?}: {e}"))))
                    .collect::<Result<Vec<_>, _>>()?;
                Step::Expect {
                    field: field.trim().to_string(),
                    values,
                }
            }
            _ => {
                if !steps.is_empty() {
                    return Err(at("setup lines must come before any step".to_string()));
                }
                let (key, value) = line
                    .split_once('=')
                    .ok_or_else(|| at(format!("expected `key = value`, got {line:?}")))?;
                setup.set(key.trim(), value.trim()).map_err(at)?;
                continue;
            }
        };
        steps.push((number, step));
    }

    Ok((setup, steps))
}

fn apply(shape: &mut RotatedShape<MemoryShape>, op: &str, arg: &str) -> Result<slidegeom::Result<()>, String> {
    if op == "flip" {
        let axis = match arg {
            "horizontal" => FlipAxis::Horizontal,
            "vertical" => FlipAxis::Vertical,
            other => return Err(format!("unknown flip axis {other:?}")),
        };
        return Ok(shape.flip(axis));
    }

    let value: f64 = arg.parse().map_err(|e| format!("bad value {arg:?}: {e}"))?;
    Ok(match op {
        "set_width" => shape.set_width(value),
        "set_height" => shape.set_height(value),
        "set_rotation" => shape.set_rotation(value),
        "set_absolute_width" => shape.set_absolute_width(value),
        "set_absolute_height" => shape.set_absolute_height(value),
        "set_left" => shape.set_left(value),
        "set_top" => shape.set_top(value),
        "increment_left" => shape.increment_left(value),
        "increment_top" => shape.increment_top(value),
        other => return Err(format!("unknown operation {other:?}")),
    })
}

fn read(shape: &RotatedShape<MemoryShape>, field: &str) -> Result<Vec<f64>, String> {
    let host = |value: slidegeom::Result<slidegeom::Length>| {
        value.map(|v| vec![v.raw()]).map_err(|e| e.to_string())
    };
    match field {
        "absolute_width" => Ok(vec![shape.absolute_width().raw()]),
        "absolute_height" => Ok(vec![shape.absolute_height().raw()]),
        "left" => Ok(vec![shape.left().raw()]),
        "top" => Ok(vec![shape.top().raw()]),
        "center" => {
            let c = shape.center();
            Ok(vec![c.x.raw(), c.y.raw()])
        }
        "width" => host(shape.width()),
        "height" => host(shape.height()),
        "handle_left" => host(shape.handle().left().map_err(Into::into)),
        "handle_top" => host(shape.handle().top().map_err(Into::into)),
        "rotation" => shape
            .rotation()
            .map(|r| vec![r.normalized().degrees()])
            .map_err(|e| e.to_string()),
        other => Err(format!("unknown field {other:?}")),
    }
}

fn run(shape: &mut RotatedShape<MemoryShape>, step: &Step) -> Result<(), String> {
    match step {
        Step::Do { op, arg } => apply(shape, op, arg)?.map_err(|e| format!("{op} {arg} failed: {e}")),
        Step::Reject { op, arg, code } => match apply(shape, op, arg)? {
            Ok(()) => Err(format!("{op} {arg} succeeded, expected {code}")),
            Err(err) => {
                let actual = err.code().map(|c| c.to_string()).unwrap_or_default();
                if actual == *code {
                    Ok(())
                } else {
                    Err(format!("{op} {arg} failed with {actual:?} ({err}), expected {code}"))
                }
            }
        },
        Step::Expect { field, values } => {
            let actual = read(shape, field)?;
            let matches = actual.len() == values.len()
                && actual.iter().zip(values).all(|(a, e)| (a - e).abs() < TOLERANCE);
            if matches {
                Ok(())
            } else {
                Err(format!("{field}: expected {values:?}, got {actual:?}"))
            }
        }
    }
}

fn test_scenario_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let (setup, steps) = parse(&source).map_err(|e| format!("{path}: {e}"))?;

    let slide = setup.slide();
    let mut shape = setup.attach(&slide)?;
    for (number, step) in &steps {
        run(&mut shape, step).map_err(|e| format!("{path}:{number}: {e}"))?;
    }
    Ok(())
}

datatest_stable::harness! {
    { test = test_scenario_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scenarios"), pattern = r"\.scn$" },
}
