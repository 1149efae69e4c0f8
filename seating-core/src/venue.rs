//! Venue model (C1): seat matrix construction and stage-distance precomputation.

use crate::models::{Seat, SeatingError};
pub use crate::models::Venue;

impl Venue {
    /// Builds an indexed seat table with precomputed `distance_to_stage` and
    /// `max_venue_distance`.
    ///
    /// Seat at row-major index `r * cols + c` has row `r`, col `c`; VIP seats
    /// form the top `vip_rows` rows. The stage is modeled as a single point
    /// one row in front of row 0, centered on the columns.
    pub fn build(rows: usize, cols: usize, vip_rows: usize) -> Result<Venue, SeatingError> {
        if rows == 0 || cols == 0 {
            return Err(SeatingError::Config(
                "venue rows and cols must both be at least 1".to_string(),
            ));
        }
        if vip_rows > rows {
            return Err(SeatingError::Config(format!(
                "vip_rows ({vip_rows}) cannot exceed rows ({rows})"
            )));
        }

        let stage_col = cols as f64 / 2.0;
        let mut seats = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let dr = (r + 1) as f64;
                let dc = c as f64 - stage_col;
                seats.push(Seat {
                    row: r,
                    col: c,
                    is_vip: r < vip_rows,
                    distance_to_stage: (dr * dr + dc * dc).sqrt(),
                });
            }
        }

        let max_venue_distance =
            (((rows + 1) * (rows + 1)) as f64 + (cols as f64 / 2.0).powi(2)).sqrt();

        Ok(Venue {
            rows,
            cols,
            vip_rows,
            seats,
            max_venue_distance,
        })
    }

    /// Manhattan distance between two seat positions.
    pub fn manhattan(&self, a: usize, b: usize) -> usize {
        let sa = &self.seats[a];
        let sb = &self.seats[b];
        sa.row.abs_diff(sb.row) + sa.col.abs_diff(sb.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_row_col_contract() {
        let venue = Venue::build(4, 5, 1).unwrap();
        for r in 0..4 {
            for c in 0..5 {
                let seat = venue.seat(r * 5 + c);
                assert_eq!(seat.row, r);
                assert_eq!(seat.col, c);
                assert_eq!(seat.is_vip, r < 1);
            }
        }
    }

    #[test]
    fn vip_rows_exceeds_rows_is_config_error() {
        let err = Venue::build(3, 3, 4).unwrap_err();
        assert!(matches!(err, SeatingError::Config(_)));
    }

    #[test]
    fn zero_rows_or_cols_is_config_error() {
        assert!(Venue::build(0, 3, 0).is_err());
        assert!(Venue::build(3, 0, 0).is_err());
    }

    #[test]
    fn stage_distance_increases_with_row() {
        let venue = Venue::build(4, 4, 0).unwrap();
        let d0 = venue.seat(0 * 4 + 2).distance_to_stage;
        let d1 = venue.seat(1 * 4 + 2).distance_to_stage;
        let d2 = venue.seat(2 * 4 + 2).distance_to_stage;
        assert!(d0 < d1);
        assert!(d1 < d2);
    }

    #[test]
    fn manhattan_distance_is_correct() {
        let venue = Venue::build(4, 4, 0).unwrap();
        // (0,0) and (2,3)
        assert_eq!(venue.manhattan(0, 2 * 4 + 3), 2 + 3);
    }
}
