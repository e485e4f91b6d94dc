use lowpass_image::ImageError;

/// An owned, exactly sized block of full-width image rows.
///
/// Used for the rows a participant owns, for the filtered rows it produces and for the halo
/// rows it borrows from its neighbors. Row accessors copy, so a block never aliases another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowBlock {
    rows: usize,
    width: usize,
    data: Vec<u8>,
}

impl RowBlock {
    /// A block of zero-valued rows.
    pub fn zeros(rows: usize, width: usize) -> Self {
        Self {
            rows,
            width,
            data: vec![0; rows * width],
        }
    }

    /// Wrap row-major data of `rows` rows of `width` samples.
    pub fn from_vec(rows: usize, width: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() != rows * width {
            return Err(ImageError::InvalidChannelShape(data.len(), rows * width));
        }
        Ok(Self { rows, width, data })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of samples in a row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the block holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// The samples, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The samples, row-major.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the block and return its samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// The samples of row `y`.
    ///
    /// PRECONDITION: `y < self.rows()`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// A copy of the first `n` rows, or of every row if the block is shorter.
    pub fn first_rows(&self, n: usize) -> RowBlock {
        let n = n.min(self.rows);
        Self {
            rows: n,
            width: self.width,
            data: self.data[..n * self.width].to_vec(),
        }
    }

    /// A copy of the last `n` rows, or of every row if the block is shorter.
    pub fn last_rows(&self, n: usize) -> RowBlock {
        let n = n.min(self.rows);
        Self {
            rows: n,
            width: self.width,
            data: self.data[(self.rows - n) * self.width..].to_vec(),
        }
    }

    /// A new block with the rows of `self` followed by the rows of `below`.
    ///
    /// PRECONDITION: both blocks have the same width.
    pub fn concat(&self, below: &RowBlock) -> RowBlock {
        debug_assert_eq!(self.width, below.width);
        let mut data = Vec::with_capacity(self.data.len() + below.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&below.data);
        Self {
            rows: self.rows + below.rows,
            width: self.width,
            data,
        }
    }
}
