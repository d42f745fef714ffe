use core::{
    marker::PhantomData,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub},
};

/// Provides the math operations required by the tangent space algorithm but which
/// aren't included in Rust's [`core`] crate.
/// With the `std` feature enabled, a (default) implementation is provided.
pub trait Ops {
    /// Provides a [`sqrt`] implementation for [`f32`].
    ///
    /// [`sqrt`]: https://doc.rust-lang.org/stable/std/primitive.f32.html#method.sqrt
    // TODO: Provide default implementation if/when `core_float_math` is stable.
    //       See https://github.com/rust-lang/rust/issues/137578
    fn sqrt(x: f32) -> f32;
}

pub(crate) struct Vec3<O: Ops> {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) z: f32,
    pub(crate) _phantom: PhantomData<fn() -> O>,
}

impl<O: Ops> Copy for Vec3<O> {}

impl<O: Ops> Clone for Vec3<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> core::fmt::Debug for Vec3<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Vec3")
            .field(&self.x)
            .field(&self.y)
            .field(&self.z)
            .finish()
    }
}

impl<O: Ops> From<[f32; 3]> for Vec3<O> {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<O: Ops> From<Vec3<O>> for [f32; 3] {
    fn from(Vec3 { x, y, z, .. }: Vec3<O>) -> Self {
        [x, y, z]
    }
}

impl<O: Ops> Vec3<O> {
    pub(crate) const ZERO: Vec3<O> = Vec3::new(0., 0., 0.);
    pub(crate) const X: Vec3<O> = Vec3::new(1., 0., 0.);
    pub(crate) const Y: Vec3<O> = Vec3::new(0., 1., 0.);
    pub(crate) const Z: Vec3<O> = Vec3::new(0., 0., 1.);

    pub(crate) const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub(crate) fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Removes the component of `self` along the unit vector `n`.
    pub(crate) fn reject_from_normalized(self, n: Self) -> Self {
        self - n * n.dot(self)
    }

    pub(crate) fn normalized_or_zero(self) -> Self {
        let length = self.length();
        if not_zero(length) && length.is_finite() {
            self * length.recip()
        } else {
            Self::ZERO
        }
    }

    pub(crate) fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub(crate) fn length(self) -> f32 {
        O::sqrt(self.length_squared())
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub(crate) fn is_zero(self) -> bool {
        !(not_zero(self.x) || not_zero(self.y) || not_zero(self.z))
    }
}

impl<O: Ops> Add for Vec3<O> {
    type Output = Vec3<O>;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<O: Ops> AddAssign for Vec3<O> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<O: Ops> Sub for Vec3<O> {
    type Output = Vec3<O>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<O: Ops> Mul<f32> for Vec3<O> {
    type Output = Vec3<O>;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec3::new(rhs * self.x, rhs * self.y, rhs * self.z)
    }
}

impl<O: Ops> Mul<Vec3<O>> for f32 {
    type Output = Vec3<O>;

    fn mul(self, rhs: Vec3<O>) -> Self::Output {
        rhs * self
    }
}

impl<O: Ops> Div<f32> for Vec3<O> {
    type Output = Vec3<O>;

    fn div(self, rhs: f32) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<O: Ops> PartialEq for Vec3<O> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl<O: Ops> Neg for Vec3<O> {
    type Output = Vec3<O>;

    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

pub(crate) fn fabsf(x: f32) -> f32 {
    if x.is_sign_negative() { -x } else { x }
}

pub(crate) fn not_zero(x: f32) -> bool {
    fabsf(x) > f32::MIN_POSITIVE
}

/// Rounds `x` down to the nearest multiple of `step`, without relying on `std`.
///
/// A `step` which isn't positive and finite leaves `x` untouched.
/// Negative zero is folded into positive zero so both land in the same cell.
pub(crate) fn snap(x: f32, step: f32) -> f32 {
    if !(step > 0. && step.is_finite()) || !x.is_finite() {
        return x + 0.;
    }

    let q = x / step;
    if fabsf(q) >= (1u64 << 62) as f32 {
        return x + 0.;
    }

    let truncated = q as i64;
    let floored = if (truncated as f32) > q {
        truncated - 1
    } else {
        truncated
    };

    floored as f32 * step + 0.
}
