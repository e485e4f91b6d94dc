use crate::error::DistError;

/// The contiguous rows owned by one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    /// The number of rows.
    pub rows: usize,
    /// The index of the first row.
    pub offset: usize,
}

impl RowRange {
    /// The index one past the last row.
    pub fn end(&self) -> usize {
        self.offset + self.rows
    }
}

/// The row decomposition of an image among the participants of a group.
///
/// Participant `i` owns the `i`-th range and the ranges follow the physical row order:
/// participant 0 owns the topmost rows and every range starts where the previous one ends.
/// When the rows do not divide evenly the first participants get one extra row each, so the
/// row counts differ by at most one. Participants beyond the number of rows own nothing.
///
/// # Example
///
/// ```
/// use lowpass_dist::plan::PartitionPlan;
///
/// let plan = PartitionPlan::new(8, 8, 3).unwrap();
/// let rows = plan.parts().iter().map(|p| p.rows).collect::<Vec<_>>();
/// assert_eq!(rows, vec![3, 3, 2]);
/// assert_eq!(plan.displacements(), vec![0, 24, 48]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    width: usize,
    total_rows: usize,
    parts: Vec<RowRange>,
}

impl PartitionPlan {
    /// Split `total_rows` rows of `width` samples among `participants`.
    pub fn new(total_rows: usize, width: usize, participants: usize) -> Result<Self, DistError> {
        if participants == 0 {
            return Err(DistError::InvalidGroupSize(participants));
        }

        let base = total_rows / participants;
        let remainder = total_rows % participants;

        let parts = (0..participants)
            .map(|i| RowRange {
                rows: base + usize::from(i < remainder),
                offset: i * base + i.min(remainder),
            })
            .collect();

        Ok(Self {
            width,
            total_rows,
            parts,
        })
    }

    /// The number of samples in a row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows of the whole image.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// The number of participants.
    pub fn num_participants(&self) -> usize {
        self.parts.len()
    }

    /// The ranges of every participant, in rank order.
    pub fn parts(&self) -> &[RowRange] {
        &self.parts
    }

    /// The range of participant `rank`.
    pub fn part(&self, rank: usize) -> Option<&RowRange> {
        self.parts.get(rank)
    }

    /// The number of samples each participant owns.
    pub fn send_counts(&self) -> Vec<usize> {
        self.parts.iter().map(|p| p.rows * self.width).collect()
    }

    /// The offset, in samples, of each participant's rows within the image.
    pub fn displacements(&self) -> Vec<usize> {
        self.parts.iter().map(|p| p.offset * self.width).collect()
    }
}
