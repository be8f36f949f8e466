use approx::{assert_abs_diff_eq};

use digital_image::{
    AnyImage, Color, Domain, ImageContainer, ImageError, ImageView, ImageViewMut, Integer,
    MajorOrder, Point, Point2D, Point3D, RealPoint2D, RealPoint3D, Value,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn corner<const D: usize>(value: Integer) -> Point<Integer, D> {
    Point::diagonal(value)
}

/// Generates the scenarios that every instantiation must pass.
///
/// `$sample` is a non-default value of the value type.
macro_rules! container_scenarios {
    ($($name:ident: $t:ty, $d:literal, $sample:expr;)*) => {$(
        mod $name {
            use super::*;

            fn type_name() -> String {
                format!("ImageContainerByVector{}D{}", $d, <$t as Value>::TYPE_NAME)
            }

            fn domain() -> Domain<$d> {
                let mut upper = corner::<$d>(4);
                upper[0] = 2;
                Domain::new(corner(-1), upper).unwrap()
            }

            #[test]
            fn registered() {
                init();
                let name = type_name();
                let lower = domain().lower_bound();
                let upper = domain().upper_bound();
                let img = AnyImage::new(&name, lower.as_array(), upper.as_array()).unwrap();
                assert_eq!(img.type_name(), name);
                assert_eq!(img.lower_bound(), lower.as_array());
                assert_eq!(img.upper_bound(), upper.as_array());
                let concrete: &ImageContainer<$t, $d> = img.downcast_ref().unwrap();
                assert!(concrete.iter().all(|v| *v == <$t>::default()));
            }

            #[test]
            fn size() {
                let img = ImageContainer::<$t, $d>::new(domain());
                let expected: usize = img.extent().iter().map(|&e| e as usize + 1).product();
                assert_eq!(img.len(), expected);
                assert_eq!(img.len(), 4 * 6_usize.pow($d - 1));
                assert_eq!(img.domain().lower_bound(), corner(-1));
            }

            #[test]
            fn point_and_linear_access() {
                let mut img = ImageContainer::<$t, $d>::new(domain());
                let point = img.domain().upper_bound();
                img[point] = $sample;
                for p in img.domain().points() {
                    let index = img.linear_index(p).unwrap();
                    assert_eq!(img[p], img[index]);
                    assert_eq!(img.point_at(index).unwrap(), p);
                }
                assert_eq!(img[img.len() - 1], $sample);
            }

            #[test]
            fn out_of_bounds() {
                let mut img = ImageContainer::<$t, $d>::new(domain());
                let outside = img.domain().upper_bound() + Point::base(0, 1);
                assert!(matches!(img.get(outside), Err(ImageError::OutOfDomain {..})));
                assert!(matches!(img.set_value(outside, $sample), Err(ImageError::OutOfDomain {..})));
                let len = img.len();
                assert_eq!(
                    img.get_linear(len).unwrap_err(),
                    ImageError::IndexOutOfRange {index: len, size: len},
                );
                assert!(img.iter().all(|v| *v == <$t>::default()));
            }

            #[test]
            fn translate_domain() {
                let mut img = ImageContainer::<$t, $d>::new(domain());
                img[corner(0)] = $sample;
                let before = img.domain();
                img.translate_domain(corner(3)).unwrap();
                assert_eq!(img.len(), before.size());
                assert_eq!(img.domain().lower_bound(), before.lower_bound() + corner(3));
                assert_eq!(img.domain().upper_bound(), before.upper_bound() + corner(3));
                assert_eq!(img[corner(3)], $sample);
            }
        }
    )*};
}

container_scenarios! {
    integer_2d: i32, 2, 7;
    integer_3d: i32, 3, -7;
    real_2d: f64, 2, 0.25;
    real_3d: f64, 3, -1.5;
    float_2d: f32, 2, 3.5;
    float_3d: f32, 3, 1e-3;
    unsigned_char_2d: u8, 2, 255;
    short_2d: i16, 2, -300;
    color_2d: Color, 2, Color::rgb(12, 34, 56);
    color_3d: Color, 3, Color::WHITE.with_alpha(128);
    point_2d_2d: Point2D, 2, Point2D::new([1, -2]);
    point_2d_3d: Point2D, 3, Point2D::new([3, 4]);
    real_point_2d_2d: RealPoint2D, 2, RealPoint2D::new([0.5, 1.0]);
    real_point_2d_3d: RealPoint2D, 3, RealPoint2D::new([-0.5, 2.0]);
    point_3d_2d: Point3D, 2, Point3D::new([1, 2, 3]);
    point_3d_3d: Point3D, 3, Point3D::new([-1, 0, 1]);
    real_point_3d_2d: RealPoint3D, 2, RealPoint3D::new([0.1, 0.2, 0.3]);
    real_point_3d_3d: RealPoint3D, 3, RealPoint3D::new([1e3, 1e-3, 0.0]);
}

#[test]
fn every_registered_name_is_covered() {
    assert_eq!(AnyImage::TYPE_NAMES.len(), 18);
}

// ----------------------------------------------------------------------------

fn sample_2d() -> ImageContainer<i32, 2> {
    let domain = Domain::new(Point2D::zero(), Point2D::new([2, 3])).unwrap();
    let mut img = ImageContainer::new(domain);
    img[Point2D::new([1, 0])] = 20;
    img[Point2D::new([0, 1])] = 40;
    img
}

#[test]
fn zero_copy_column_major() {
    init();
    let mut img = sample_2d();
    let mut array = img.as_ndarray_mut(MajorOrder::ColumnMajor).unwrap();
    assert_eq!(array[[1, 0]], 20);
    assert_eq!(array[[0, 1]], 40);
    array[[1, 1]] = 15;
    assert_eq!(img[Point2D::new([1, 1])], 15);
}

#[test]
fn zero_copy_row_major() {
    init();
    let mut img = sample_2d();
    let mut array = img.as_ndarray_mut(MajorOrder::RowMajor).unwrap();
    assert_eq!(array[[0, 1]], 20);
    assert_eq!(array[[1, 0]], 40);
    array[[1, 1]] = 15;
    assert_eq!(img[Point2D::new([1, 1])], 15);
}

#[test]
fn reimport_reproduces_bounds() {
    init();
    for order in ["F", "C"] {
        let order: MajorOrder = order.parse().unwrap();
        let mut img = sample_2d();
        img.translate_domain(Point2D::new([10, -10])).unwrap();
        let lower = img.domain().lower_bound();
        let mut array = img.to_ndarray(order).unwrap();
        let view = ImageView::<i32, 2>::from_ndarray(&array, lower, order).unwrap();
        assert_eq!(view.domain(), img.domain());
        assert_eq!(view, img);
        let mut view = ImageViewMut::<i32, 2>::from_ndarray_mut(&mut array, lower, order).unwrap();
        view[Point2D::new([12, -7])] = 99;
        let copy = ImageContainer::<i32, 2>::from_ndarray(&array, lower, order).unwrap();
        assert_eq!(copy[Point2D::new([12, -7])], 99);
    }
}

fn sample_3d() -> ImageContainer<i32, 3> {
    let domain = Domain::new(Point3D::zero(), Point3D::new([2, 3, 4])).unwrap();
    let mut img = ImageContainer::new(domain);
    img[Point3D::new([1, 0, 0])] = 20;
    img[Point3D::new([0, 1, 0])] = 40;
    img[Point3D::new([0, 0, 2])] = 50;
    img[Point3D::new([0, 3, 2])] = 100;
    img
}

#[test]
fn zero_copy_3d() {
    init();
    for order in [MajorOrder::ColumnMajor, MajorOrder::RowMajor] {
        // Array index of a point offset, in `order`.
        let at = |p: [usize; 3]| match order {
            MajorOrder::ColumnMajor => p,
            MajorOrder::RowMajor => [p[2], p[1], p[0]],
        };
        let mut img = sample_3d();
        {
            let mut array = img.as_ndarray_mut(order).unwrap();
            assert_eq!(array.shape(), at([3, 4, 5]));
            assert_eq!(array[at([1, 0, 0])], 20);
            assert_eq!(array[at([0, 1, 0])], 40);
            assert_eq!(array[at([0, 0, 2])], 50);
            assert_eq!(array[at([0, 3, 2])], 100);
            array[at([1, 1, 1])] = 15;
        }
        assert_eq!(img[Point3D::new([1, 1, 1])], 15);

        img.translate_domain(Point3D::new([4, -2, 7])).unwrap();
        let lower = img.domain().lower_bound();
        let mut array = img.to_ndarray(order).unwrap();
        let view = ImageView::<i32, 3>::from_ndarray(&array, lower, order).unwrap();
        assert_eq!(view.domain(), img.domain());
        assert_eq!(view[lower + Point3D::new([0, 3, 2])], 100);
        assert_eq!(view, img);
        let mut view = ImageViewMut::<i32, 3>::from_ndarray_mut(&mut array, lower, order).unwrap();
        view[lower + Point3D::new([2, 3, 4])] = -1;
        assert_eq!(array[at([2, 3, 4])], -1);
    }
}

#[test]
fn real_values_through_raw_buffers() {
    init();
    let domain = Domain::new(Point3D::zero(), Point3D::new([1, 2, 3])).unwrap();
    let img = ImageContainer::from_fn(domain, |p| 0.1 * p.norm1() as f64);
    let raw = img.raw_buffer(MajorOrder::RowMajor);
    let any = AnyImage::from_raw("ImageContainerByVector3DReal", &raw, &[0, 0, 0]).unwrap();
    let copy: &ImageContainer<f64, 3> = any.downcast_ref().unwrap();
    assert_abs_diff_eq!(*copy, img);
    let sum: f64 = copy.iter().sum();
    assert_abs_diff_eq!(sum, 0.1 * 72.0, epsilon = 1e-9);
}

#[test]
fn invalid_order() {
    assert_eq!("X".parse::<MajorOrder>(), Err(ImageError::InvalidOrder("X".into())));
}
