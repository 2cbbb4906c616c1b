/// A location within a document's source text.
///
/// Lines and columns are one-based and increase monotonically. Positions
/// order by line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position {
    /// The line number, starting at 1.
    pub line: u32,
    /// The column number, starting at 1.
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line >= 1 && column >= 1);
        Position { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((1, 5), (1, 10))]
    #[case((1, 10), (2, 1))]
    #[case((1, 5), (2, 1))]
    #[case((3, 7), (4, 1))]
    fn total_order(#[case] lesser: (u32, u32), #[case] greater: (u32, u32)) {
        let lesser = Position::new(lesser.0, lesser.1);
        let greater = Position::new(greater.0, greater.1);
        assert!(lesser < greater);
        assert!(greater > lesser);
    }

    #[test]
    fn not_less_than_itself() {
        let p = Position::new(1, 5);
        assert!(p >= p);
        assert!(!(p < p));
        assert_eq!(p, p);
    }
}
