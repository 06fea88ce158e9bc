//! Rational quadratic and cubic Bézier tracers.
//!
//! A rational quadratic is cut at its horizontal and vertical extrema so
//! every remaining piece is monotone, then each piece is walked with a
//! curvature-adaptive error term. Cubics are cut at their extrema and
//! inflections and each piece is approximated by two plain quadratics.
//!
//! All pieces of one curve record into the same [`Stroke`], so their
//! anti-aliased edges merge by maximum instead of adding up where they meet.

use crate::render::splat::Plot;
use crate::render::stroke::Stroke;
use crate::render::{round_half_up, steppable, EPSILON};

/// Deepest midpoint split of a thin (`w < 0.5`) segment before it is drawn
/// as a straight line instead.
pub const MAX_SPLIT_DEPTH: u32 = 16;

/// Trace a rational quadratic Bézier from `(x0, y0)` to `(x2, y2)` with
/// control point `(x1, y1)` weighted by `w`.
///
/// `w = 1` is an ordinary quadratic, `w < 1` an ellipse arc, `w > 1` a
/// hyperbola arc. A negative (or NaN) weight draws nothing.
#[allow(clippy::too_many_arguments)]
pub fn trace_rational_quadratic(
    stroke: &mut Stroke<'_>,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    w: f32,
) {
    let [mut x0, mut y0, mut x1, mut y1, mut x2, mut y2] =
        [x0, y0, x1, y1, x2, y2].map(round_half_up);
    let mut w = w;

    if w.is_nan() || w < 0.0 || w.is_infinite() {
        log::trace!("rational quadratic with weight {w} skipped");
        return;
    }
    if !steppable(&[x0, y0, x1, y1, x2, y2]) {
        log::trace!("rational quadratic ({x0}, {y0}) -> ({x2}, {y2}) cannot be stepped, skipped");
        return;
    }

    let x = x0 - 2.0 * x1 + x2;
    let y = y0 - 2.0 * y1 + y2;
    let xx = x0 - x1;
    let yy = y0 - y1;

    // Horizontal cut.
    if xx * (x2 - x1) > 0.0 {
        if yy * (y2 - y1) > 0.0 && (xx * y).abs() > (yy * x).abs() {
            // Cut at the vertical extremum first: swap the ends.
            x0 = x2;
            x2 = xx + x1;
            y0 = y2;
            y2 = yy + y1;
        }

        let t = if x0 == x2 || w == 1.0 {
            (x0 - x1) / x
        } else {
            let mut q = (4.0 * w * w * (x0 - x1) * (x2 - x1) + (x2 - x0) * (x2 - x0)).sqrt();
            if x1 < x0 {
                q = -q;
            }
            (2.0 * w * (x0 - x1) - x0 + x2 + q) / (2.0 * (1.0 - w) * (x2 - x0))
        };

        let cut = Cut::at(t, w, [x0, y0, x1, y1, x2, y2]);
        w = cut.rest_weight;
        let (px, py) = (round_half_up(cut.x), round_half_up(cut.y));

        let ey = (cut.x - x0) * (y1 - y0) / (x1 - x0) + y0;
        quad_segment(stroke, x0, y0, px, round_half_up(ey), px, py, cut.head_weight, 0);

        let ey = (cut.x - x2) * (y1 - y2) / (x1 - x2) + y2;
        y1 = round_half_up(ey);
        x0 = px;
        x1 = px;
        y0 = py;
    }

    // Vertical cut.
    if (y0 - y1) * (y2 - y1) > 0.0 {
        let t = if y0 == y2 || w == 1.0 {
            (y0 - y1) / (y0 - 2.0 * y1 + y2)
        } else {
            let mut q = (4.0 * w * w * (y0 - y1) * (y2 - y1) + (y2 - y0) * (y2 - y0)).sqrt();
            if y1 < y0 {
                q = -q;
            }
            (2.0 * w * (y0 - y1) - y0 + y2 + q) / (2.0 * (1.0 - w) * (y2 - y0))
        };

        let cut = Cut::at(t, w, [x0, y0, x1, y1, x2, y2]);
        w = cut.rest_weight;
        let (px, py) = (round_half_up(cut.x), round_half_up(cut.y));

        let ex = (x1 - x0) * (cut.y - y0) / (y1 - y0) + x0;
        quad_segment(stroke, x0, y0, round_half_up(ex), py, px, py, cut.head_weight, 0);

        let ex = (x1 - x2) * (cut.y - y2) / (y1 - y2) + x2;
        x1 = round_half_up(ex);
        x0 = px;
        y0 = py;
        y1 = py;
    }

    quad_segment(stroke, x0, y0, x1, y1, x2, y2, w * w, 0);
}

/// Point and weights of a rational quadratic split at parameter `t`.
struct Cut {
    x: f32,
    y: f32,
    /// Squared control weight of the piece before the cut.
    head_weight: f32,
    /// Control weight of the piece after the cut.
    rest_weight: f32,
}

impl Cut {
    fn at(t: f32, w: f32, [x0, y0, x1, y1, x2, y2]: [f32; 6]) -> Self {
        let q = 1.0 / (2.0 * t * (1.0 - t) * (w - 1.0) + 1.0);
        let x = (t * t * (x0 - 2.0 * w * x1 + x2) + 2.0 * t * (w * x1 - x0) + x0) * q;
        let y = (t * t * (y0 - 2.0 * w * y1 + y2) + 2.0 * t * (w * y1 - y0) + y0) * q;

        let head = t * (w - 1.0) + 1.0;
        Self {
            x,
            y,
            head_weight: head * head * q,
            rest_weight: ((1.0 - t) * (w - 1.0) + 1.0) * q.sqrt(),
        }
    }
}

/// How a stepping pass over a monotone segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// The end point was reached.
    Done,
    /// The error terms became unusable; draw the rest as a straight line.
    Flatten,
    /// The dominant direction changed; fill the band tail and continue.
    Settle,
}

/// Error-term state of the segment walk.
struct Walker {
    x0: f32,
    y0: f32,
    x2: f32,
    y2: f32,
    sx: f32,
    sy: f32,
    dx: f32,
    dy: f32,
    xx: f32,
    yy: f32,
    xy: f32,
    err: f32,
    /// Stroke thickness.
    th: f32,
    /// Edge distance of the last step.
    ed: f32,
    /// Band width of the last step, `(th - 1) * ed`.
    band: f32,
}

impl Walker {
    fn can_step(&self) -> bool {
        self.dy + 2.0 * self.yy < 0.0 && self.dx + 2.0 * self.xx > 0.0
    }

    fn lost_direction(&self) -> bool {
        self.dx + 2.0 * self.xx <= 0.0 || self.dy + 2.0 * self.yy >= 0.0
    }

    /// Step along y while the curve is steep, sweeping the band along x.
    fn walk_y(&mut self, out: &mut impl Plot) -> Walk {
        loop {
            let (dx, dy) = (self.dx, self.dy);
            self.ed = -dy - 2.0 * dy * dx * dx / (4.0 * dy * dy + dx * dx);
            self.band = (self.th - 1.0) * self.ed;
            let ed = self.ed;

            let steps = ((self.err - ed - self.band / 2.0) / dy).floor();
            let mut e2 = self.err - steps * dy - self.band / 2.0;
            let mut x1 = self.x0 - steps * self.sx;
            out.plot(x1, self.y0, 1.0 - e2 / ed);

            e2 = -self.band - dy - e2;
            while e2 - dy < ed {
                x1 += self.sx;
                out.plot(x1, self.y0, 1.0);
                e2 -= dy;
            }
            out.plot(x1 + self.sx, self.y0, 1.0 - e2 / ed);

            if (self.y0 - self.y2).abs() < EPSILON {
                return Walk::Done;
            }

            self.err += self.dx;
            self.y0 += self.sy;
            self.dy += self.xy;
            self.dx += self.xx;
            if 2.0 * self.err + self.dy > 0.0 {
                self.err += self.dy;
                self.x0 += self.sx;
                self.dx += self.xy;
                self.dy += self.yy;
            }

            if self.x0 != self.x2 && self.lost_direction() {
                return if (self.y2 - self.y0).abs() > (self.x2 - self.x0).abs() {
                    Walk::Flatten
                } else {
                    Walk::Settle
                };
            }
            let slope = self.dx + self.dy + self.xy;
            if slope >= 0.0 || slope.is_nan() {
                return Walk::Settle;
            }
        }
    }

    /// Finish the band rows left behind after a y walk.
    fn fill_y(&self, out: &mut impl Plot) {
        let ed = self.ed;
        let mut cur = self.err - self.dy - self.band / 2.0;
        let mut y1 = self.y0;
        while cur < ed {
            let mut e2 = cur;
            let mut x1 = self.x0;
            while e2 - self.dy < ed {
                x1 -= self.sx;
                out.plot(x1, y1, 1.0);
                e2 -= self.dy;
            }
            out.plot(x1 - self.sx, y1, 1.0 - e2 / ed);
            y1 += self.sy;
            cur += self.dx;
        }
    }

    /// Step along x while the curve is flat, sweeping the band along y.
    fn walk_x(&mut self, out: &mut impl Plot) -> Walk {
        loop {
            let (dx, dy) = (self.dx, self.dy);
            self.ed = dx + 2.0 * dx * dy * dy / (4.0 * dx * dx + dy * dy);
            self.band = (self.th - 1.0) * self.ed;
            let ed = self.ed;

            let steps = ((self.err + ed + self.band / 2.0) / dx).floor();
            let mut e2 = steps * dx - self.band / 2.0 - self.err;
            let mut y1 = self.y0 - steps * self.sy;
            out.plot(self.x0, y1, 1.0 - e2 / ed);

            e2 = dx - e2 - self.band;
            while e2 + dx < ed {
                y1 += self.sy;
                out.plot(self.x0, y1, 1.0);
                e2 += dx;
            }
            out.plot(self.x0, y1 + self.sy, 1.0 - e2 / ed);

            if (self.x0 - self.x2).abs() < EPSILON {
                return Walk::Done;
            }

            self.x0 += self.sx;
            self.dx += self.xy;
            self.err += self.dy;
            self.dy += self.yy;
            if 2.0 * self.err + self.dx < 0.0 {
                self.y0 += self.sy;
                self.dy += self.xy;
                self.err += self.dx;
                self.dx += self.xx;
            }

            if self.y0 != self.y2 && self.lost_direction() {
                return if (self.y2 - self.y0).abs() <= (self.x2 - self.x0).abs() {
                    Walk::Flatten
                } else {
                    Walk::Settle
                };
            }
            let slope = self.dx + self.dy + self.xy;
            if slope < 0.0 || slope.is_nan() {
                return Walk::Settle;
            }
        }
    }

    /// Finish the band columns left behind after an x walk.
    fn fill_x(&self, out: &mut impl Plot) {
        let ed = self.ed;
        let mut cur = -self.err + self.dx - self.band / 2.0;
        let mut x1 = self.x0;
        while cur < ed {
            let mut e2 = cur;
            let mut y1 = self.y0;
            while e2 + self.dx < ed {
                y1 -= self.sy;
                out.plot(x1, y1, 1.0);
                e2 += self.dx;
            }
            out.plot(x1, y1 - self.sy, 1.0 - e2 / ed);
            x1 += self.sx;
            cur -= self.dy;
        }
    }
}

/// Trace one monotone rational quadratic segment with squared weight `w`.
///
/// A segment that changes direction in x or y draws nothing. Straight or
/// zero-weight segments become a line.
#[allow(clippy::too_many_arguments)]
fn quad_segment(
    stroke: &mut Stroke<'_>,
    mut x0: f32,
    mut y0: f32,
    x1: f32,
    y1: f32,
    mut x2: f32,
    mut y2: f32,
    w: f32,
    depth: u32,
) {
    let sx = x2 - x1;
    let sy = y2 - y1;
    let dx = x0 - x2;
    let dy = y0 - y2;
    let xx = x0 - x1;
    let yy = y0 - y1;
    let xy = xx * sy + yy * sx;
    let mut cur = xx * sy - yy * sx;

    if xx * sx > 0.0 || yy * sy > 0.0 {
        log::trace!("non-monotone segment ({x0}, {y0}) -> ({x2}, {y2}) skipped");
        return;
    }

    if cur != 0.0 && w > 0.0 {
        // Begin at the end closer to the control point.
        if sx * sx + sy * sy > xx * xx + yy * yy {
            x2 = x0;
            x0 -= dx;
            y2 = y0;
            y0 -= dy;
            cur = -cur;
        }

        let mut xx = 2.0 * (4.0 * w * sx * xx + dx * dx);
        let mut yy = 2.0 * (4.0 * w * sy * yy + dy * dy);
        let sx = if x0 < x2 { 1.0 } else { -1.0 };
        let sy = if y0 < y2 { 1.0 } else { -1.0 };
        let mut xy = -2.0 * sx * sy * (2.0 * w * xy + dx * dy);

        if cur * sx * sy < 0.0 {
            xx = -xx;
            yy = -yy;
            cur = -cur;
            xy = -xy;
        }

        let dx = 4.0 * w * (x1 - x0) * sy * cur + xx / 2.0;
        let dy = 4.0 * w * (y0 - y1) * sx * cur + yy / 2.0;

        // Thin conic: the error step would be invalid, halve the segment.
        if w < 0.5 && (dx + xx <= 0.0 || dy + yy >= 0.0) {
            if depth >= MAX_SPLIT_DEPTH {
                log::warn!(
                    "segment ({x0}, {y0}) -> ({x2}, {y2}) still too thin after {depth} splits, drawing a line"
                );
                stroke.line(x0, y0, x2, y2);
                return;
            }

            let half = (w + 1.0) / 2.0;
            let root = w.sqrt();
            let inv = 1.0 / (root + 1.0);
            let mx = round_half_up((x0 + 2.0 * root * x1 + x2) * inv / 2.0);
            let my = round_half_up((y0 + 2.0 * root * y1 + y2) * inv / 2.0);

            let cx = round_half_up((root * x1 + x0) * inv);
            let cy = round_half_up((root * y1 + y0) * inv);
            quad_segment(stroke, x0, y0, cx, cy, mx, my, half, depth + 1);

            let cx = round_half_up((root * x1 + x2) * inv);
            let cy = round_half_up((root * y1 + y2) * inv);
            quad_segment(stroke, mx, my, cx, cy, x2, y2, half, depth + 1);
            return;
        }

        let mut walker = Walker {
            x0,
            y0,
            x2,
            y2,
            sx,
            sy,
            dx,
            dy,
            xx,
            yy,
            xy,
            err: 0.0,
            th: stroke.weight(),
            ed: 0.0,
            band: 0.0,
        };

        while walker.can_step() {
            let steep = walker.dx + walker.dy + walker.xy < 0.0;
            let walk = if steep {
                walker.walk_y(stroke)
            } else {
                walker.walk_x(stroke)
            };

            match walk {
                Walk::Done => return,
                Walk::Flatten => break,
                Walk::Settle if steep => walker.fill_y(stroke),
                Walk::Settle => walker.fill_x(stroke),
            }
        }

        x0 = walker.x0;
        y0 = walker.y0;
        x2 = walker.x2;
        y2 = walker.y2;
    }

    stroke.line(x0, y0, x2, y2);
}

/// Trace a cubic Bézier from `(x0, y0)` to `(x3, y3)` with control points
/// `(x1, y1)` and `(x2, y2)`.
///
/// The curve is cut at every extremum and inflection; each piece is drawn as
/// two quadratic segments meeting at its midpoint.
#[allow(clippy::too_many_arguments)]
pub fn trace_cubic_bezier(
    stroke: &mut Stroke<'_>,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
) {
    let [mut x0, mut y0, x1, y1, x2, y2, x3, y3] =
        [x0, y0, x1, y1, x2, y2, x3, y3].map(round_half_up);

    if !steppable(&[x0, y0, x1, y1, x2, y2, x3, y3]) {
        log::trace!("cubic ({x0}, {y0}) -> ({x3}, {y3}) cannot be stepped, skipped");
        return;
    }

    if [x1, x2, x3] == [x0; 3] && [y1, y2, y3] == [y0; 3] {
        stroke.line(x0, y0, x0, y0);
        return;
    }

    let xc = x0 + x1 - x2 - x3;
    let xa = xc - 4.0 * (x1 - x2);
    let xb = x0 - x1 - x2 + x3;
    let xd = xb + 4.0 * (x1 + x2);
    let yc = y0 + y1 - y2 - y3;
    let ya = yc - 4.0 * (y1 - y2);
    let yb = y0 - y1 - y2 + y3;
    let yd = yb + 4.0 * (y1 + y2);

    // Split parameters on [-1, 1], at most two extrema per axis plus two
    // inflections.
    let mut params: Vec<f32> = Vec::with_capacity(7);
    extrema(xa, xb, xc, &mut params);
    extrema(ya, yb, yc, &mut params);

    let t1 = 2.0 * (xa * yb - xb * ya);
    let t2 = xa * yc - xc * ya;
    let disc = t2 * t2 - 2.0 * t1 * (xb * yc - xc * yb);
    if disc > 0.0 {
        let root = disc.sqrt();
        for t in [(t2 + root) / t1, (t2 - root) / t1] {
            if t.abs() < 1.0 {
                params.push(t);
            }
        }
    }

    params.sort_by(f32::total_cmp);
    params.push(1.0);

    let mut fx0 = x0;
    let mut fy0 = y0;
    let mut t1 = -1.0;

    for &t2 in &params {
        let mut fx1 = (t1 * (t1 * xb - 2.0 * xc) - t2 * (t1 * (t1 * xa - 2.0 * xb) + xc) + xd) / 8.0 - fx0;
        let mut fy1 = (t1 * (t1 * yb - 2.0 * yc) - t2 * (t1 * (t1 * ya - 2.0 * yb) + yc) + yd) / 8.0 - fy0;
        let mut fx2 = (t2 * (t2 * xb - 2.0 * xc) - t1 * (t2 * (t2 * xa - 2.0 * xb) + xc) + xd) / 8.0 - fx0;
        let mut fy2 = (t2 * (t2 * yb - 2.0 * yc) - t1 * (t2 * (t2 * ya - 2.0 * yb) + yc) + yd) / 8.0 - fy0;

        let fx3 = (t2 * (t2 * (3.0 * xb - t2 * xa) - 3.0 * xc) + xd) / 8.0;
        let fy3 = (t2 * (t2 * (3.0 * yb - t2 * ya) - 3.0 * yc) + yd) / 8.0;
        fx0 -= fx3;
        fy0 -= fy3;

        let ex = round_half_up(fx3);
        let ey = round_half_up(fy3);

        // Rescale the control offsets onto the rounded end point.
        if fx0 != 0.0 {
            let ratio = (x0 - ex) / fx0;
            fx1 *= ratio;
            fx2 *= ratio;
        }
        if fy0 != 0.0 {
            let ratio = (y0 - ey) / fy0;
            fy1 *= ratio;
            fy2 *= ratio;
        }

        if (x0 - ex).abs() > EPSILON || (y0 - ey).abs() > EPSILON {
            cubic_segment(stroke, x0, y0, x0 + fx1, y0 + fy1, x0 + fx2, y0 + fy2, ex, ey);
        }

        x0 = ex;
        y0 = ey;
        fx0 = fx3;
        fy0 = fy3;
        t1 = t2;
    }
}

/// Roots in (-1, 1) of one axis' derivative, appended to `params`.
fn extrema(a: f32, b: f32, c: f32, params: &mut Vec<f32>) {
    if a == 0.0 {
        if c.abs() < 2.0 * b.abs() {
            params.push(c / (2.0 * b));
        }
        return;
    }

    let disc = b * b - a * c;
    if disc > 0.0 {
        let root = disc.sqrt();
        for t in [(b - root) / a, (b + root) / a] {
            if t.abs() < 1.0 {
                params.push(t);
            }
        }
    }
}

/// Approximate one monotone cubic piece by two plain quadratics.
#[allow(clippy::too_many_arguments)]
fn cubic_segment(
    stroke: &mut Stroke<'_>,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
) {
    let mx = ((x0 + 3.0 * x1 + 3.0 * x2 + x3 + 4.0) / 8.0).floor();
    let my = ((y0 + 3.0 * y1 + 3.0 * y2 + y3 + 4.0) / 8.0).floor();

    quad_segment(
        stroke,
        x0,
        y0,
        ((x0 + 3.0 * x1 + 2.0) / 4.0).floor(),
        ((y0 + 3.0 * y1 + 2.0) / 4.0).floor(),
        mx,
        my,
        1.0,
        0,
    );
    quad_segment(
        stroke,
        mx,
        my,
        ((3.0 * x2 + x3 + 2.0) / 4.0).floor(),
        ((3.0 * y2 + y3 + 2.0) / 4.0).floor(),
        x3,
        y3,
        1.0,
        0,
    );
}
