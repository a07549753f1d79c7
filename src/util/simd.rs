//! SIMD-friendly helpers that power the distance scan.

/// SIMD-accelerated numerical operations over `f32` slices.
///
/// Every kernel processes 8 lanes at a time with `wide::f32x8` and finishes
/// the tail with scalar code. Callers guarantee equal slice lengths.
pub mod numeric {
    use wide::f32x8;

    const LANES: usize = 8;

    #[inline]
    fn load(slice: &[f32]) -> f32x8 {
        let mut lanes = [0.0f32; LANES];
        lanes.copy_from_slice(slice);
        f32x8::new(lanes)
    }

    #[inline]
    fn horizontal_sum(v: f32x8) -> f32 {
        v.to_array().iter().sum()
    }

    /// Squared Euclidean distance, `sum((a[i] - b[i])^2)`.
    #[inline]
    pub fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());

        let a_chunks = a.chunks_exact(LANES);
        let b_chunks = b.chunks_exact(LANES);
        let a_tail = a_chunks.remainder();
        let b_tail = b_chunks.remainder();

        let mut acc = f32x8::ZERO;
        for (ca, cb) in a_chunks.zip(b_chunks) {
            let diff = load(ca) - load(cb);
            acc += diff * diff;
        }

        let mut result = horizontal_sum(acc);
        for (x, y) in a_tail.iter().zip(b_tail) {
            let diff = x - y;
            result += diff * diff;
        }
        result
    }

    /// Inner product, `sum(a[i] * b[i])`.
    #[inline]
    pub fn dot(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());

        let a_chunks = a.chunks_exact(LANES);
        let b_chunks = b.chunks_exact(LANES);
        let a_tail = a_chunks.remainder();
        let b_tail = b_chunks.remainder();

        let mut acc = f32x8::ZERO;
        for (ca, cb) in a_chunks.zip(b_chunks) {
            acc += load(ca) * load(cb);
        }

        let mut result = horizontal_sum(acc);
        for (x, y) in a_tail.iter().zip(b_tail) {
            result += x * y;
        }
        result
    }

    /// Squared L2 norm, `sum(v[i]^2)`.
    #[inline]
    pub fn sum_of_squares(v: &[f32]) -> f32 {
        dot(v, v)
    }

    /// Inner product accumulated in `f64`.
    ///
    /// The product of two finite `f32` values always fits an `f64`, so this
    /// neither underflows to zero nor overflows to infinity.
    pub fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum()
    }

    /// Euclidean norm accumulated in `f64`.
    pub fn norm_f64(v: &[f32]) -> f64 {
        dot_f64(v, v).sqrt()
    }
}
