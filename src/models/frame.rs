use std::fmt;
use std::str::FromStr;

/// Frame indicates the completeness of the selected reading frame
///
/// It is based on the GeneMarkS-T classification of predicted ORFs:
/// - `Complete` ORFs carry both start and stop codon
/// - `Partial5` ORFs are truncated at the 5' end
/// - `Partial3` ORFs are truncated at the 3' end
/// - `Internal` ORFs have neither boundary
///
/// # Examples
/// ```rust
/// use std::str::FromStr;
/// use transannot::models::Frame;
///
/// let frame = Frame::from_str("Partial 5 Prime").unwrap();
/// assert_eq!(frame, Frame::Partial5);
/// assert_eq!(frame.to_string(), "Partial 5 Prime");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Frame {
    /// No frame selection has run (or the input was protein)
    Unset,
    Complete,
    Internal,
    Partial5,
    Partial3,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Frame::Unset => "",
                Frame::Complete => "Complete",
                Frame::Internal => "Internal",
                Frame::Partial5 => "Partial 5 Prime",
                Frame::Partial3 => "Partial 3 Prime",
            }
        )
    }
}

impl FromStr for Frame {
    type Err = String;
    /// Creates a [`Frame`] from a GeneMarkS-T frame label
    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "Complete" | "complete" => Ok(Frame::Complete),
            "Internal" | "internal" => Ok(Frame::Internal),
            "Partial 5 Prime" | "5prime_partial" => Ok(Frame::Partial5),
            "Partial 3 Prime" | "3prime_partial" => Ok(Frame::Partial3),
            _ => Err(format!("invalid frame indicator {}", s)),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::Unset
    }
}
