/// Hidden size of a `[1, tokens, dim]` transformer output holding `len` values
///
/// `None` when the shape is not a single sequence of `tokens` non-empty rows.
pub fn hidden_size(shape: &[i64], tokens: usize, len: usize) -> Option<usize> {
    let [batch, seq, dim] = shape else {
        return None;
    };

    let batch = usize::try_from(*batch).ok()?;
    let seq = usize::try_from(*seq).ok()?;
    let dim = usize::try_from(*dim).ok()?;

    (batch == 1 && seq == tokens && dim > 0 && seq.checked_mul(dim) == Some(len)).then_some(dim)
}

/// Mean of the token vectors whose attention mask is set
///
/// `hidden` is the row-major `[tokens, dim]` output of a transformer for a
/// single sequence.
pub fn mean_pool(hidden: &[f32], dim: usize, mask: &[u32]) -> Vec<f32> {
    let mut pooled = vec![0.0_f32; dim];
    let mut counted = 0_u32;

    for (row, &keep) in hidden.chunks_exact(dim).zip(mask) {
        if keep == 0 {
            continue;
        }
        for (acc, value) in pooled.iter_mut().zip(row) {
            *acc += value;
        }
        counted += 1;
    }

    if counted > 0 {
        #[allow(clippy::cast_precision_loss)]
        let divisor = counted as f32;
        for value in &mut pooled {
            *value /= divisor;
        }
    }

    pooled
}

/// Scale `vector` to unit Euclidean length in place
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt().max(1e-12);
    for value in vector {
        *value /= norm;
    }
}
