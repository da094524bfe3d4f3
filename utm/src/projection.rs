use crate::{
    constants::{FALSE_EASTING, K0, WGS84_A, WGS84_F},
    UtmError, Zone,
};
use geo::Coord;

/// A projected position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utm {
    pub zone: Zone,
    /// Meters, 500 000 on the central meridian.
    pub easting: f64,
    /// Meters from the equator, negative south of it.
    pub northing: f64,
}

/// Projects `coord` (`x` = longitude, `y` = latitude, decimal degrees)
/// into the UTM zone containing it.
pub fn project(coord: Coord<f64>) -> Result<Utm, UtmError> {
    let Coord { x: lon, y: lat } = coord;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(UtmError::Latitude(lat));
    }
    let zone = Zone::from_longitude(lon)?;
    let (easting, northing) = Krueger::wgs84().forward(lat, lon - zone.central_meridian());
    Ok(Utm {
        zone,
        easting,
        northing,
    })
}

/// Krüger series coefficients of an ellipsoid, to sixth order in the
/// third flattening.
struct Krueger {
    /// First eccentricity.
    e: f64,
    /// Rectifying radius scaled by `K0`.
    k0_a: f64,
    alpha: [f64; 6],
}

impl Krueger {
    fn new(a: f64, f: f64) -> Self {
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_radius = a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4
                - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1_983_433.0 / 1_935_360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                + 15061.0 / 26880.0 * n5
                + 167_603.0 / 181_440.0 * n6,
            49561.0 / 161_280.0 * n4 - 179.0 / 168.0 * n5 + 6_601_661.0 / 7_257_600.0 * n6,
            34729.0 / 80640.0 * n5 - 3_418_889.0 / 1_995_840.0 * n6,
            212_378_941.0 / 319_334_400.0 * n6,
        ];

        Self {
            e: (f * (2.0 - f)).sqrt(),
            k0_a: K0 * rectifying_radius,
            alpha,
        }
    }

    fn wgs84() -> Self {
        Self::new(WGS84_A, WGS84_F)
    }

    /// Returns `(easting, northing)` of a point at latitude `lat` and
    /// `dlon` degrees east of the central meridian.
    fn forward(&self, lat: f64, dlon: f64) -> (f64, f64) {
        let (sin_phi, lambda) = (lat.to_radians().sin(), dlon.to_radians());
        let e = self.e;

        // Conformal latitude, as its tangent.
        let tau = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();

        let xi_prime = tau.atan2(lambda.cos());
        let eta_prime = (lambda.sin() / tau.hypot(1.0)).atanh();

        let (mut xi, mut eta) = (xi_prime, eta_prime);
        for (j, alpha) in (1..).zip(self.alpha) {
            let k = 2.0 * f64::from(j);
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        (FALSE_EASTING + self.k0_a * eta, self.k0_a * xi)
    }
}
