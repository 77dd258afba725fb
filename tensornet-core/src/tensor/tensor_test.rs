use super::*;
use approx::assert_relative_eq;

fn tensor(data: Vec<f32>, dims: Vec<usize>) -> Tensor {
    Tensor::new(data, dims).expect("tensor creation failed in test")
}

#[test]
fn test_new_validates_volume() {
    assert!(Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]).is_err());
    assert!(Tensor::new(vec![], vec![]).is_err());
    assert!(Tensor::new(vec![], vec![0]).is_err());
    let t = tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.len(), 4);
}

#[test]
fn test_zeros_and_filled() {
    let z = Tensor::zeros(vec![3, 2]).unwrap();
    assert!(z.data().iter().all(|&x| x == 0.0));
    let f = Tensor::filled(vec![5], 1.5).unwrap();
    assert_eq!(f.data(), &[1.5; 5]);
}

#[test]
fn test_get_set_bounds_checked() {
    let mut t = tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    assert_eq!(t.get(&[0, 0]).unwrap(), 1.0);
    assert_eq!(t.get(&[1, 2]).unwrap(), 6.0);
    t.set(&[1, 0], 9.0).unwrap();
    assert_eq!(t.get(&[1, 0]).unwrap(), 9.0);

    assert!(matches!(
        t.get(&[2, 0]),
        Err(TensorNetError::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        t.get(&[0, 3]),
        Err(TensorNetError::IndexOutOfBounds { .. })
    ));
    // Index arity must match the rank.
    assert!(t.get(&[1]).is_err());
    assert!(t.set(&[0, 0, 0], 1.0).is_err());
}

#[test]
fn test_elementwise_arithmetic() {
    let mut a = tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = tensor(vec![4.0, 3.0, 2.0, 1.0], vec![2, 2]);

    a.add(&b).unwrap();
    assert_eq!(a.data(), &[5.0, 5.0, 5.0, 5.0]);
    a.sub(&b).unwrap();
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
    a.mul(&b).unwrap();
    assert_eq!(a.data(), &[4.0, 6.0, 6.0, 4.0]);
    a.div(&b).unwrap();
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_elementwise_shape_mismatch() {
    let mut a = tensor(vec![1.0, 2.0], vec![2]);
    let b = tensor(vec![1.0, 2.0], vec![1, 2]);
    let before = a.duplicate();
    assert!(matches!(
        a.add(&b),
        Err(TensorNetError::ShapeMismatch { .. })
    ));
    // A failed operation leaves the receiver untouched.
    assert_eq!(a, before);
}

#[test]
fn test_scalar_arithmetic() {
    let mut t = tensor(vec![2.0, 4.0], vec![2]);
    t.add_scalar(1.0);
    assert_eq!(t.data(), &[3.0, 5.0]);
    t.sub_scalar(1.0);
    t.mul_scalar(2.0);
    assert_eq!(t.data(), &[4.0, 8.0]);
    t.div_scalar(4.0);
    assert_eq!(t.data(), &[1.0, 2.0]);
}

#[test]
fn test_fill() {
    let mut t = Tensor::zeros(vec![2, 2]).unwrap();
    t.fill(7.0);
    assert_eq!(t.data(), &[7.0; 4]);
}

#[test]
fn test_duplicate_is_value_copy() {
    let original = tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let mut copy = original.duplicate();
    assert_eq!(copy, original);
    copy.set(&[0], 100.0).unwrap();
    assert_eq!(original.get(&[0]).unwrap(), 1.0);
}

#[test]
fn test_matrix_mul() {
    let a = tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let c = a.matrix_mul(&b).unwrap();
    assert_eq!(c.dims(), &[2, 2]);
    assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
    // Operands unchanged.
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_matrix_mul_inner_dim_mismatch() {
    let a = tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    assert!(matches!(
        a.matrix_mul(&b),
        Err(TensorNetError::IncompatibleShapes { .. })
    ));
}

#[test]
fn test_matrix_mul_requires_2d() {
    let v = tensor(vec![1.0, 2.0], vec![2]);
    let m = tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    assert!(matches!(
        v.matrix_mul(&m),
        Err(TensorNetError::UnsupportedRank { .. })
    ));
    assert!(m.matrix_mul(&v).is_err());
}

#[test]
fn test_trans() {
    let t = tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let transposed = t.trans().unwrap();
    assert_eq!(transposed.dims(), &[3, 2]);
    assert_eq!(transposed.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(t.dims(), &[2, 3]);
}

#[test]
fn test_trans_requires_2d() {
    let t = tensor(vec![1.0, 2.0, 3.0], vec![3]);
    assert!(matches!(
        t.trans(),
        Err(TensorNetError::UnsupportedRank { .. })
    ));
}

#[test]
fn test_for_each_and_convert() {
    let t = tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let mut sum = 0.0;
    t.for_each(|x| sum += x);
    assert_relative_eq!(sum, 6.0);

    let doubled = t.convert(|x| x * 2.0);
    assert_eq!(doubled.dims(), t.dims());
    assert_eq!(doubled.data(), &[2.0, 4.0, 6.0]);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0]);
}
