use super::*;
use approx::assert_relative_eq;

fn identity_dense(size: usize) -> Layer {
    let mut weight = Tensor::zeros(vec![size, size]).unwrap();
    for i in 0..size {
        weight.set(&[i, i], 1.0).unwrap();
    }
    Layer::dense(weight, None, Activation::Identity).unwrap()
}

#[test]
fn test_input_layer_passes_through() {
    let mut layer = Layer::input(3).unwrap();
    assert_eq!(layer.kind(), LayerKind::Input);
    assert_eq!(layer.in_size(), 3);
    assert_eq!(layer.out_size(), 3);
    assert!(layer.weight().is_none());

    let input = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let output = layer.forward(&input, 2).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_input_layer_rejects_backward() {
    let mut layer = Layer::input(3).unwrap();
    let input = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    layer.forward(&input, 1).unwrap();
    assert!(matches!(
        layer.backward(&input, 1),
        Err(TensorNetError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_input_layer_rejects_zero_size() {
    assert!(Layer::input(0).is_err());
}

#[test]
fn test_dense_constructor_validates_shapes() {
    let weight = Tensor::zeros(vec![3]).unwrap();
    assert!(matches!(
        Layer::dense(weight, None, Activation::Identity),
        Err(TensorNetError::UnsupportedRank { .. })
    ));

    let weight = Tensor::zeros(vec![3, 2]).unwrap();
    let bad_bias = Tensor::zeros(vec![3]).unwrap();
    assert!(matches!(
        Layer::dense(weight, Some(bad_bias), Activation::Identity),
        Err(TensorNetError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_dense_forward() {
    // weight [3, 2]: out[o] = Σ_i in[i] * w[i][o]
    let weight = Tensor::new(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0], vec![3, 2]).unwrap();
    let bias = Tensor::new(vec![0.1, 0.2], vec![2]).unwrap();
    let mut layer = Layer::dense(weight, Some(bias), Activation::Identity).unwrap();
    assert_eq!(layer.in_size(), 3);
    assert_eq!(layer.out_size(), 2);

    let input = Tensor::new(vec![10.0, 20.0, 30.0], vec![3]).unwrap();
    let output = layer.forward(&input, 2).unwrap();
    // [10*1 + 20*2 + 30*3, 10*4 + 20*5 + 30*6] + [0.1, 0.2]
    assert_relative_eq!(output.data()[0], 140.1, epsilon = 1e-4);
    assert_relative_eq!(output.data()[1], 320.2, epsilon = 1e-4);
}

#[test]
fn test_forward_rejects_wrong_input_shape() {
    let mut layer = identity_dense(3);
    let input = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(matches!(
        layer.forward(&input, 1),
        Err(TensorNetError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_backward_before_forward_fails() {
    let mut layer = identity_dense(2);
    let error = Tensor::new(vec![0.1, 0.1], vec![2]).unwrap();
    assert!(matches!(
        layer.backward(&error, 1),
        Err(TensorNetError::StateViolation { .. })
    ));
}

#[test]
fn test_backward_threads_error_through_transposed_weight() {
    // weight [2, 2] = [[1, 2], [3, 4]]
    let weight = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let mut layer = Layer::output(weight, None, Activation::Identity).unwrap();

    let input = Tensor::new(vec![1.0, 1.0], vec![2]).unwrap();
    layer.forward(&input, 1).unwrap();

    let error = Tensor::new(vec![0.5, 1.0], vec![2]).unwrap();
    let upstream = layer.backward(&error, 1).unwrap();

    // upstream[i] = Σ_o err[o] * w[i][o]
    assert_relative_eq!(upstream.data()[0], 0.5 * 1.0 + 1.0 * 2.0, epsilon = 1e-5);
    assert_relative_eq!(upstream.data()[1], 0.5 * 3.0 + 1.0 * 4.0, epsilon = 1e-5);

    // weight[i][o] -= input[i] * err[o]
    let w = layer.weight().unwrap();
    assert_relative_eq!(w.get(&[0, 0]).unwrap(), 1.0 - 0.5, epsilon = 1e-5);
    assert_relative_eq!(w.get(&[0, 1]).unwrap(), 2.0 - 1.0, epsilon = 1e-5);
    assert_relative_eq!(w.get(&[1, 0]).unwrap(), 3.0 - 0.5, epsilon = 1e-5);
    assert_relative_eq!(w.get(&[1, 1]).unwrap(), 4.0 - 1.0, epsilon = 1e-5);
}

#[test]
fn test_backward_updates_bias() {
    let weight = Tensor::zeros(vec![2, 2]).unwrap();
    let bias = Tensor::new(vec![1.0, 1.0], vec![2]).unwrap();
    let mut layer = Layer::dense(weight, Some(bias), Activation::Identity).unwrap();

    let input = Tensor::new(vec![0.0, 0.0], vec![2]).unwrap();
    layer.forward(&input, 1).unwrap();
    let error = Tensor::new(vec![0.25, -0.5], vec![2]).unwrap();
    layer.backward(&error, 1).unwrap();

    let b = layer.bias().unwrap();
    assert_relative_eq!(b.data()[0], 0.75, epsilon = 1e-6);
    assert_relative_eq!(b.data()[1], 1.5, epsilon = 1e-6);
}

#[test]
fn test_backward_rejects_wrong_error_shape() {
    let mut layer = identity_dense(2);
    let input = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    layer.forward(&input, 1).unwrap();
    let error = Tensor::new(vec![0.1, 0.2, 0.3], vec![3]).unwrap();
    assert!(matches!(
        layer.backward(&error, 1),
        Err(TensorNetError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_sigmoid_layer_forward_saturates() {
    let weight = Tensor::filled(vec![1, 1], 10.0).unwrap();
    let mut layer = Layer::dense(weight, None, Activation::Sigmoid).unwrap();
    let input = Tensor::new(vec![10.0], vec![1]).unwrap();
    let output = layer.forward(&input, 1).unwrap();
    assert_relative_eq!(output.data()[0], 1.0, epsilon = 1e-5);
}
