/// 저항 입력 행을 가리키는 식별자. 행이 지워져도 다른 행의 식별자는 그대로다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResistorRow {
    pub id: RowId,
    pub value: String,
}

/// DC 직렬/병렬용 저항 입력 목록. 항상 한 행 이상 남는다.
#[derive(Debug, Clone)]
pub struct ResistorList {
    rows: Vec<ResistorRow>,
    next_id: u32,
}

impl Default for ResistorList {
    fn default() -> Self {
        Self::new()
    }
}

impl ResistorList {
    /// 빈 입력 한 행으로 시작한다.
    pub fn new() -> Self {
        let mut list = Self {
            rows: Vec::new(),
            next_id: 0,
        };
        list.add();
        list
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[ResistorRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ResistorRow] {
        &mut self.rows
    }

    /// 빈 행을 끝에 추가하고 그 식별자를 돌려준다.
    pub fn add(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(ResistorRow {
            id,
            value: String::new(),
        });
        id
    }

    /// 행을 지운다. 마지막 한 행이거나 없는 행이면 아무것도 하지 않고 `false`.
    pub fn remove(&mut self, id: RowId) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        match self.rows.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.rows.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, id: RowId, text: &str) -> bool {
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.value = text.to_string();
                true
            }
            None => false,
        }
    }

    /// 숫자로 해석되는 값만 입력 순서대로 모은다. 빈 칸이나 잘못된 값은 건너뛴다.
    pub fn values(&self) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| crate::input::parse_number(&r.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_row_that_cannot_be_removed() {
        let mut list = ResistorList::new();
        let only = list.rows()[0].id;
        assert!(!list.remove(only));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn added_rows_are_removable_independently() {
        let mut list = ResistorList::new();
        let first = list.rows()[0].id;
        let second = list.add();
        let third = list.add();
        assert_eq!(list.len(), 3);

        assert!(list.remove(second));
        assert_eq!(list.len(), 2);
        assert!(!list.remove(second));

        assert!(list.remove(first));
        assert!(!list.remove(third));
        assert_eq!(list.rows()[0].id, third);
    }

    #[test]
    fn values_skip_blank_and_invalid_rows() {
        let mut list = ResistorList::new();
        let a = list.rows()[0].id;
        let b = list.add();
        let c = list.add();
        list.set_value(a, "10");
        list.set_value(b, "oops");
        list.set_value(c, "20");
        assert_eq!(list.values(), vec![10.0, 20.0]);
    }
}
