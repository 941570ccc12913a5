//! Builder of small GRIB2 messages on regular lat/lon grids.
//!
//! Messages use grid definition template 3.0, product definition template
//! 4.0 and simple packing (data representation template 5.0) with 16-bit
//! integers, no binary or decimal scaling and the minimum value as the
//! reference value, so every value that differs from the minimum by a whole
//! number below 65536 is encoded exactly.

pub(crate) const MICRO: i32 = 1_000_000;

/// Indicator of unit of time range (Code Table 4.4).
pub(crate) mod unit {
    pub(crate) const MINUTE: u8 = 0;
    pub(crate) const HOUR: u8 = 1;
    pub(crate) const DAY: u8 = 2;
    pub(crate) const MONTH: u8 = 3;
}

#[derive(Debug, Clone)]
pub(crate) struct MessageBuilder {
    discipline: u8,
    category: u8,
    number: u8,
    date: (u16, u8, u8),
    forecast: (u8, u32),
    // first and last latitude, in microdegrees
    lats: (i32, i32),
    lons: (i32, i32),
    ni: u32,
    nj: u32,
    scanning_mode: u8,
    values: Vec<Option<f32>>,
}

impl MessageBuilder {
    /// Creates a 2x2 grid of "Temperature" scanned from south to north.
    pub(crate) fn new() -> Self {
        Self {
            discipline: 0,
            category: 0,
            number: 0,
            date: (2024, 5, 21),
            forecast: (unit::HOUR, 0),
            lats: (10 * MICRO, 20 * MICRO),
            lons: (100 * MICRO, 110 * MICRO),
            ni: 2,
            nj: 2,
            scanning_mode: 0b01000000,
            values: vec![Some(0.0); 4],
        }
    }

    pub(crate) fn parameter(mut self, discipline: u8, category: u8, number: u8) -> Self {
        self.discipline = discipline;
        self.category = category;
        self.number = number;
        self
    }

    /// "Temperature" (discipline 0, category 0, number 0).
    pub(crate) fn temperature(self) -> Self {
        self.parameter(0, 0, 0)
    }

    /// "Wind speed" (discipline 0, category 2, number 1).
    pub(crate) fn wind_speed(self) -> Self {
        self.parameter(0, 2, 1)
    }

    /// "Significant height of combined wind waves and swell" (discipline 10,
    /// category 0, number 3).
    pub(crate) fn wave_height(self) -> Self {
        self.parameter(10, 0, 3)
    }

    pub(crate) fn reference_date(mut self, year: u16, month: u8, day: u8) -> Self {
        self.date = (year, month, day);
        self
    }

    pub(crate) fn forecast(mut self, unit: u8, value: u32) -> Self {
        self.forecast = (unit, value);
        self
    }

    /// Sets the grid points: `lats` and `lons` are the first and last
    /// coordinates in scanning order and `values` are in scanning order,
    /// `i` (longitude) varying fastest. The scanning mode follows from the
    /// order of the latitudes.
    pub(crate) fn grid(
        mut self,
        (lat_first, lat_last): (f64, f64),
        (lon_first, lon_last): (f64, f64),
        (ni, nj): (u32, u32),
        values: Vec<Option<f32>>,
    ) -> Self {
        assert_eq!(values.len(), (ni * nj) as usize);
        self.lats = (to_micro(lat_first), to_micro(lat_last));
        self.lons = (to_micro(lon_first), to_micro(lon_last));
        self.ni = ni;
        self.nj = nj;
        self.scanning_mode = if lat_first < lat_last {
            0b01000000
        } else {
            0b00000000
        };
        self.values = values;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let sections = [
            self.section1(),
            self.section3(),
            self.section4(),
            self.section5(),
            self.section6(),
            self.section7(),
        ];
        let total_length = 16 + sections.iter().map(Vec::len).sum::<usize>() + 4;

        let mut message = Vec::with_capacity(total_length);
        message.extend_from_slice(b"GRIB");
        message.extend_from_slice(&[0, 0]);
        message.push(self.discipline);
        message.push(2);
        message.extend_from_slice(&(total_length as u64).to_be_bytes());
        for section in sections {
            message.extend_from_slice(&section);
        }
        message.extend_from_slice(b"7777");
        message
    }

    fn section1(&self) -> Vec<u8> {
        let (year, month, day) = self.date;
        let mut body = Vec::new();
        body.extend_from_slice(&34u16.to_be_bytes()); // centre: Tokyo
        body.extend_from_slice(&0u16.to_be_bytes());
        body.push(5); // master tables version
        body.push(1); // local tables version
        body.push(1); // start of forecast
        body.extend_from_slice(&year.to_be_bytes());
        body.push(month);
        body.push(day);
        body.extend_from_slice(&[0, 0, 0]); // hour, minute, second
        body.push(0); // operational products
        body.push(1); // forecast products
        section(1, &body)
    }

    fn section3(&self) -> Vec<u8> {
        let mut body = Vec::new();
        body.push(0); // source of grid definition
        body.extend_from_slice(&(self.ni * self.nj).to_be_bytes());
        body.push(0);
        body.push(0);
        body.extend_from_slice(&0u16.to_be_bytes()); // template 3.0

        body.push(6); // shape of the earth
        body.push(0);
        body.extend_from_slice(&0u32.to_be_bytes());
        body.push(0);
        body.extend_from_slice(&0u32.to_be_bytes());
        body.push(0);
        body.extend_from_slice(&0u32.to_be_bytes());
        body.extend_from_slice(&self.ni.to_be_bytes());
        body.extend_from_slice(&self.nj.to_be_bytes());
        body.extend_from_slice(&0u32.to_be_bytes()); // basic angle
        body.extend_from_slice(&u32::MAX.to_be_bytes()); // subdivisions
        body.extend_from_slice(&sign_magnitude(self.lats.0));
        body.extend_from_slice(&sign_magnitude(self.lons.0));
        body.push(0b00110000); // resolution and component flags
        body.extend_from_slice(&sign_magnitude(self.lats.1));
        body.extend_from_slice(&sign_magnitude(self.lons.1));
        body.extend_from_slice(&increment(self.lons, self.ni).to_be_bytes());
        body.extend_from_slice(&increment(self.lats, self.nj).to_be_bytes());
        body.push(self.scanning_mode);
        section(3, &body)
    }

    fn section4(&self) -> Vec<u8> {
        let (unit, value) = self.forecast;
        let mut body = Vec::new();
        body.extend_from_slice(&0u16.to_be_bytes()); // number of coordinate values
        body.extend_from_slice(&0u16.to_be_bytes()); // template 4.0

        body.push(self.category);
        body.push(self.number);
        body.push(2); // forecast
        body.push(0);
        body.push(0);
        body.extend_from_slice(&0u16.to_be_bytes());
        body.push(0);
        body.push(unit);
        body.extend_from_slice(&value.to_be_bytes());
        body.push(1); // ground or water surface
        body.push(0);
        body.extend_from_slice(&0u32.to_be_bytes());
        body.push(255); // missing
        body.push(0);
        body.extend_from_slice(&0u32.to_be_bytes());
        section(4, &body)
    }

    fn reference_value(&self) -> f32 {
        self.values
            .iter()
            .flatten()
            .copied()
            .reduce(f32::min)
            .unwrap_or(0.0)
    }

    fn num_present(&self) -> u32 {
        self.values.iter().flatten().count() as u32
    }

    fn section5(&self) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&self.num_present().to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes()); // template 5.0
        body.extend_from_slice(&self.reference_value().to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes()); // binary scale factor
        body.extend_from_slice(&0u16.to_be_bytes()); // decimal scale factor
        body.push(16);
        body.push(0); // floating point
        section(5, &body)
    }

    fn section6(&self) -> Vec<u8> {
        if self.values.iter().all(Option::is_some) {
            return section(6, &[255]);
        }
        let mut body = vec![0];
        for chunk in self.values.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_some())
                .fold(0u8, |acc, (i, _)| acc | (0b10000000 >> i));
            body.push(byte);
        }
        section(6, &body)
    }

    fn section7(&self) -> Vec<u8> {
        let reference = self.reference_value();
        let mut body = Vec::new();
        for value in self.values.iter().flatten() {
            let packed = (value - reference).round() as u16;
            body.extend_from_slice(&packed.to_be_bytes());
        }
        section(7, &body)
    }
}

/// Returns bytes starting like a GRIB edition 1 message.
pub(crate) fn grib1_header() -> Vec<u8> {
    let mut buf = b"GRIB".to_vec();
    buf.extend_from_slice(&[0, 0, 52, 1]);
    buf.extend_from_slice(&[0; 48]);
    buf
}

fn section(num: u8, body: &[u8]) -> Vec<u8> {
    let len = (5 + body.len()) as u32;
    let mut buf = Vec::with_capacity(len as usize);
    buf.extend_from_slice(&len.to_be_bytes());
    buf.push(num);
    buf.extend_from_slice(body);
    buf
}

fn to_micro(degrees: f64) -> i32 {
    (degrees * f64::from(MICRO)).round() as i32
}

fn sign_magnitude(value: i32) -> [u8; 4] {
    let magnitude = value.unsigned_abs();
    let encoded = if value < 0 {
        magnitude | 0x8000_0000
    } else {
        magnitude
    };
    encoded.to_be_bytes()
}

fn increment((first, last): (i32, i32), n: u32) -> u32 {
    if n > 1 {
        first.abs_diff(last) / (n - 1)
    } else {
        0
    }
}
