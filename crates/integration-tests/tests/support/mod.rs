pub mod mock_gui;
