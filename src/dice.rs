use rand::Rng;

/// A mutable arrangement of dice with rolled faces, used by the board
/// generator to mutate candidate boards one die at a time.
///
/// `positions[i]` is the die assigned to board slot `i` and
/// `die_faces[i]` the rolled face index for that slot.
#[derive(Debug, Clone)]
pub struct Dice {
    dice: Vec<Vec<String>>,
    positions: Vec<usize>,
    die_faces: Vec<usize>,
}

impl Dice {
    /// Take ownership of the dice and roll them all.
    pub fn new<R: Rng>(dice: Vec<Vec<String>>, rng: &mut R) -> Dice {
        let count = dice.len();
        let mut this = Dice {
            dice,
            positions: vec![0; count],
            die_faces: vec![0; count],
        };
        this.roll(rng);
        this
    }

    /// The letters that correspond to the current board.
    pub fn letters(&self) -> String {
        let mut letters = String::new();
        for i in 0..self.dice.len() {
            letters.push_str(&self.dice[self.positions[i]][self.die_faces[i]]);
        }
        letters
    }

    /// Exchange the dice (and their rolled faces) at two board slots.
    pub fn swap_dice(&mut self, i: usize, j: usize) {
        self.positions.swap(i, j);
        self.die_faces.swap(i, j);
    }

    /// Randomly select a face for the die at board slot `i`.
    pub fn roll_one<R: Rng>(&mut self, i: usize, rng: &mut R) {
        self.die_faces[i] = rng.gen_range(0..self.dice[self.positions[i]].len());
    }

    /// Re-roll every die and shuffle the position assignments.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) {
        for i in 0..self.dice.len() {
            self.positions[i] = i;
            self.roll_one(i, rng);
        }
        self.scramble(rng);
    }

    fn scramble<R: Rng>(&mut self, rng: &mut R) {
        let mut max = match self.dice.len() {
            0 => return,
            n => n - 1,
        };
        while max > 0 {
            let r = rng.gen_range(0..max);
            self.swap_dice(r, max);
            max -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_dice() -> Vec<Vec<String>> {
        vec![
            vec![String::from("A")],
            vec![String::from("B")],
            vec![String::from("C")],
        ]
    }

    #[test]
    fn test_letters_cover_every_die() {
        let mut rng = StdRng::seed_from_u64(1);
        let dice = Dice::new(fixed_dice(), &mut rng);
        let mut letters: Vec<char> = dice.letters().chars().collect();
        letters.sort_unstable();
        assert_eq!(letters, ['A', 'B', 'C']);
    }

    #[test]
    fn test_swap_dice() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut dice = Dice::new(fixed_dice(), &mut rng);
        let before = dice.letters();
        dice.swap_dice(0, 2);
        let after = dice.letters();
        assert_eq!(before.chars().rev().collect::<String>(), after);
    }

    #[test]
    fn test_roll_one_stays_on_die() {
        let mut rng = StdRng::seed_from_u64(7);
        let faces = vec![vec![String::from("X"), String::from("Y")]];
        let mut dice = Dice::new(faces, &mut rng);
        for _ in 0..10 {
            dice.roll_one(0, &mut rng);
            assert!(matches!(dice.letters().as_str(), "X" | "Y"));
        }
    }

    #[test]
    fn test_empty_dice() {
        let mut rng = StdRng::seed_from_u64(1);
        let dice = Dice::new(Vec::new(), &mut rng);
        assert_eq!(dice.letters(), "");
    }
}
