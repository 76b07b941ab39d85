mod tests {
    use embedded_storage::nor_flash::{
        ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
    };
    use ornament_light_engine::{
        Command, CommandQueue, Engine, Settings, SettingsStore, dispatch, presets,
    };

    const CAPACITY: usize = 256;
    const PAGE: usize = 64;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl NorFlashError for MockError {
        fn kind(&self) -> NorFlashErrorKind {
            NorFlashErrorKind::Other
        }
    }

    struct MockFlash {
        mem: [u8; CAPACITY],
    }

    impl MockFlash {
        fn new() -> Self {
            Self {
                mem: [0xFF; CAPACITY],
            }
        }
    }

    impl ErrorType for MockFlash {
        type Error = MockError;
    }

    impl ReadNorFlash for MockFlash {
        const READ_SIZE: usize = 1;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), MockError> {
            let offset = offset as usize;
            if offset + bytes.len() > CAPACITY {
                return Err(MockError);
            }
            bytes.copy_from_slice(&self.mem[offset..offset + bytes.len()]);
            Ok(())
        }

        fn capacity(&self) -> usize {
            CAPACITY
        }
    }

    impl NorFlash for MockFlash {
        const WRITE_SIZE: usize = 1;
        const ERASE_SIZE: usize = PAGE;

        fn erase(&mut self, from: u32, to: u32) -> Result<(), MockError> {
            self.mem[from as usize..to as usize].fill(0xFF);
            Ok(())
        }

        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), MockError> {
            let offset = offset as usize;
            for (cell, byte) in self.mem[offset..offset + bytes.len()].iter_mut().zip(bytes) {
                *cell &= byte;
            }
            Ok(())
        }
    }

    fn fixture() -> (Engine<'static, 12>, SettingsStore<MockFlash>) {
        (
            Engine::new(&presets::CATALOG),
            SettingsStore::mount(MockFlash::new()),
        )
    }

    #[test]
    fn test_select_activates_and_persists() {
        let (mut engine, mut store) = fixture();
        let queue = CommandQueue::<4>::new();

        queue.push(Command::Select(2)).unwrap();
        dispatch(&queue, &mut engine, &mut store);

        assert_eq!(engine.active(), 2);
        assert_eq!(store.settings().animation, 2);
    }

    #[test]
    fn test_select_out_of_range_changes_nothing() {
        let (mut engine, mut store) = fixture();
        store.save(Settings { animation: 5 }).unwrap();
        let queue = CommandQueue::<4>::new();

        queue.push(Command::Select(200)).unwrap();
        dispatch(&queue, &mut engine, &mut store);

        assert_eq!(engine.active(), 0);
        assert_eq!(store.settings().animation, 5);
    }

    #[test]
    fn test_next_cycles_and_skips_reserved_slot() {
        let (mut engine, mut store) = fixture();
        let queue = CommandQueue::<4>::new();

        queue.push(Command::Next).unwrap();
        dispatch(&queue, &mut engine, &mut store);
        assert_eq!(engine.active(), 1);
        assert_eq!(store.settings().animation, 1);

        // From the last selectable entry, next wraps to the front rather
        // than landing on the reserved all-off slot.
        engine.select(9);
        queue.push(Command::Next).unwrap();
        dispatch(&queue, &mut engine, &mut store);
        assert_eq!(engine.active(), 0);
        assert_eq!(store.settings().animation, 0);
    }

    #[test]
    fn test_blackout_selects_reserved_without_persisting() {
        let (mut engine, mut store) = fixture();
        let queue = CommandQueue::<4>::new();

        queue.push(Command::Select(4)).unwrap();
        dispatch(&queue, &mut engine, &mut store);

        queue.push(Command::Blackout).unwrap();
        dispatch(&queue, &mut engine, &mut store);

        assert_eq!(engine.active(), presets::CATALOG.all_off());
        assert_eq!(store.settings().animation, 4);
    }

    #[test]
    fn test_resync_keeps_selection() {
        let (mut engine, mut store) = fixture();
        let queue = CommandQueue::<4>::new();

        queue.push(Command::Select(3)).unwrap();
        queue.push(Command::Resync).unwrap();
        dispatch(&queue, &mut engine, &mut store);

        assert_eq!(engine.active(), 3);
        assert_eq!(store.settings().animation, 3);
    }

    #[test]
    fn test_queue_rejects_overflow() {
        let queue = CommandQueue::<2>::new();
        queue.push(Command::Next).unwrap();
        queue.push(Command::Resync).unwrap();
        assert!(queue.push(Command::Blackout).is_err());
    }
}
