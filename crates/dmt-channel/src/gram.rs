use dmt_core::{ChannelMatrix, Complex64, HermitianMatrix};

/// Builds `A = H^H H` (size `Nt`), `A[j][k] = sum_i conj(H[i][j]) H[i][k]`.
///
/// Only the upper triangle is accumulated; the lower triangle is its
/// conjugate mirror, so the result is Hermitian by construction.
pub fn build_gram(h: &ChannelMatrix) -> HermitianMatrix {
    let nt = h.cols();
    let mut gram = HermitianMatrix::zeros(nt);
    for j in 0..nt {
        for k in j..nt {
            let mut sum = Complex64::new(0.0, 0.0);
            for i in 0..h.rows() {
                sum += h.get(i, j).conj() * h.get(i, k);
            }
            if j == k {
                sum.im = 0.0;
            }
            gram.set(j, k, sum);
            gram.set(k, j, sum.conj());
        }
    }
    gram
}

/// Builds `H H^H` (size `Nr`), `B[i][l] = sum_j H[i][j] conj(H[l][j])`.
pub fn build_outer_gram(h: &ChannelMatrix) -> HermitianMatrix {
    let nr = h.rows();
    let mut gram = HermitianMatrix::zeros(nr);
    for i in 0..nr {
        for l in i..nr {
            let mut sum = Complex64::new(0.0, 0.0);
            for (a, b) in h.row(i).iter().zip(h.row(l).iter()) {
                sum += *a * b.conj();
            }
            if i == l {
                sum.im = 0.0;
            }
            gram.set(i, l, sum);
            gram.set(l, i, sum.conj());
        }
    }
    gram
}
