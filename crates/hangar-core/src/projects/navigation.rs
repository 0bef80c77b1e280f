//! Selection arithmetic over a flat list rendered as a row-major grid.
//!
//! All functions take the current index and item count and return the new
//! index. They never fail: an empty list or a zero column count leaves the
//! index unchanged.

/// Circular move by `delta` over `count` items.
pub fn wrap_index(selected: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return selected;
    }
    let step = delta.rem_euclid(count as isize) as usize;
    (selected % count + step) % count
}

/// Move by `row_delta` rows in a grid of `column_count` columns.
///
/// Moving above the first row wraps to the lowest row that has an item in
/// the current column. Moving below the last row, or into a short last row
/// that has no item in the current column, wraps to the top of the column.
pub fn grid_vertical(selected: usize, row_delta: isize, column_count: usize, count: usize) -> usize {
    if count == 0 || column_count == 0 {
        return selected;
    }
    let selected = selected.min(count - 1);
    let current_row = selected / column_count;
    let current_col = selected % column_count;
    let total_rows = count.div_ceil(column_count);
    let target_row = (current_row as isize).saturating_add(row_delta);

    if target_row < 0 {
        let mut row = total_rows - 1;
        while row > 0 && row * column_count + current_col >= count {
            row -= 1;
        }
        return (row * column_count + current_col).min(count - 1);
    }

    let target_row = target_row as usize;
    if target_row >= total_rows {
        return current_col;
    }

    let index = target_row * column_count + current_col;
    if index >= count { current_col } else { index }
}

/// Move by `col_delta` along the flattened list.
///
/// Deliberately asymmetric: stepping past the end wraps to index 0, while
/// stepping before the start only moves back one (stopping at 0) and never
/// wraps to the end. `column_count` does not affect the result; it is part of
/// the signature so horizontal and vertical moves share one call shape.
pub fn grid_horizontal(selected: usize, col_delta: isize, _column_count: usize, count: usize) -> usize {
    if count == 0 {
        return selected;
    }
    let target = (selected as isize).saturating_add(col_delta);
    if target >= count as isize {
        0
    } else if target < 0 {
        selected.saturating_sub(1)
    } else {
        target as usize
    }
}
