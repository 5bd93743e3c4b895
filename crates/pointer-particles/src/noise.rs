use rand::Rng;

const TABLE_BITS: u32 = 12;
const TABLE_MASK: u32 = (1 << TABLE_BITS) - 1;
const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: u32 = 1 << Y_WRAP_BITS;
const OCTAVES: usize = 4;
const FALLOFF: f32 = 0.5;

/// A smooth scalar field over the plane. Samples lie in `[0, 1)`.
pub trait NoiseField {
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Layered lattice noise: a table of random values, cosine-eased between
/// lattice points and summed over four octaves with halving amplitude.
pub struct PerlinField {
    table: Vec<f32>,
}

impl PerlinField {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let table = (0..=TABLE_MASK).map(|_| rng.random::<f32>()).collect();
        Self { table }
    }

    fn at(&self, offset: u32) -> f32 {
        self.table[(offset & TABLE_MASK) as usize]
    }
}

fn ease(t: f32) -> f32 {
    0.5 * (1.0 - (t * std::f32::consts::PI).cos())
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f32, y: f32) -> f32 {
        // the field is mirrored around the axes
        let (x, y) = (x.abs(), y.abs());
        let mut xi = x.floor() as u32;
        let mut yi = y.floor() as u32;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut total = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..OCTAVES {
            let of = xi.wrapping_add(yi.wrapping_shl(Y_WRAP_BITS));
            let rx = ease(xf);
            let ry = ease(yf);

            let mut n1 = self.at(of);
            n1 += rx * (self.at(of.wrapping_add(1)) - n1);
            let mut n2 = self.at(of.wrapping_add(Y_WRAP));
            n2 += rx * (self.at(of.wrapping_add(Y_WRAP + 1)) - n2);
            n1 += ry * (n2 - n1);

            total += n1 * amplitude;
            amplitude *= FALLOFF;

            xi = xi.wrapping_shl(1);
            xf *= 2.0;
            yi = yi.wrapping_shl(1);
            yf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi = yi.wrapping_add(1);
                yf -= 1.0;
            }
        }
        total
    }
}

/// A flat field, handy where motion must not depend on noise.
#[derive(Clone, Copy, Default)]
pub struct ConstantField(pub f32);

impl NoiseField for ConstantField {
    fn sample(&self, _x: f32, _y: f32) -> f32 {
        self.0
    }
}
